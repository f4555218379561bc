//! Structural safety check for whole-script rewrites.
//!
//! Free-text prompt instructions cannot guarantee that a rewrite keeps every
//! operation, so before accepting one we count a small set of characteristic
//! operation invocations in both versions and reject rewrites that regress
//! materially.

/// Invocation patterns counted in original and rewritten scripts.
const COUNTED_OPERATIONS: &[&str] = &[
    ".click(",
    ".fill(",
    ".press(",
    ".goto(",
    ".check(",
    ".uncheck(",
    ".selectOption(",
    "expect(",
];

/// Returns true when the candidate retains at least `threshold` of every
/// counted operation present in the original.
pub fn rewrite_is_safe(original: &str, candidate: &str, threshold: f64) -> bool {
    for op in COUNTED_OPERATIONS {
        let before = original.matches(op).count();
        if before == 0 {
            continue;
        }
        let after = candidate.matches(op).count();
        if (after as f64) < (before as f64) * threshold {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicks(n: usize) -> String {
        "await page.click('#a');\n".repeat(n)
    }

    #[test]
    fn test_identical_script_is_safe() {
        let script = clicks(10);
        assert!(rewrite_is_safe(&script, &script, 0.9));
    }

    #[test]
    fn test_eight_of_ten_clicks_rejected() {
        assert!(!rewrite_is_safe(&clicks(10), &clicks(8), 0.9));
    }

    #[test]
    fn test_nine_of_ten_clicks_accepted() {
        assert!(rewrite_is_safe(&clicks(10), &clicks(9), 0.9));
    }

    #[test]
    fn test_added_operations_are_fine() {
        assert!(rewrite_is_safe(&clicks(3), &clicks(5), 0.9));
    }

    #[test]
    fn test_operation_absent_from_original_is_ignored() {
        let original = "await page.goto('https://example.com');";
        let candidate = "await page.goto('https://example.com');\nawait expect(page).toHaveTitle('t');";
        assert!(rewrite_is_safe(original, candidate, 0.9));
    }

    #[test]
    fn test_dropped_assertions_rejected() {
        let original = "await expect(a).toBeVisible();\nawait expect(b).toBeVisible();\n";
        let candidate = "await page.click('#a');";
        assert!(!rewrite_is_safe(original, candidate, 0.9));
    }

    #[test]
    fn test_empty_candidate_rejected() {
        assert!(!rewrite_is_safe(&clicks(1), "", 0.9));
    }

    #[test]
    fn test_empty_original_is_safe() {
        assert!(rewrite_is_safe("", "anything", 0.9));
    }
}
