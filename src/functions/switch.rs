/// `switch` — pick a value by matching the test string against case labels.
///
/// ```text
/// {{#switch: test
///  | case1 = result1
///  | case2
///  | case3 = result3
///  | #default = fallback
/// #}}
/// ```
///
/// `case2` has no value of its own and falls through to `result1`. See
/// [`crate::case_table`] for the full table rules.
use crate::case_table::CaseTable;
use crate::functions::{Env, Outcome, ParserFunction};

pub struct Switch;

impl ParserFunction for Switch {
    fn min_args(&self) -> usize {
        2
    }

    fn call(&self, _env: &Env<'_>, args: &[String]) -> Outcome {
        Ok(CaseTable::build(args).lookup().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::functions::testing::call;

    #[test]
    fn matches_explicit_case() {
        assert_eq!(call("switch", &["b", "a=1", "b=2", "c=3"]), Ok("2".into()));
    }

    #[test]
    fn bare_case_falls_through_to_previous_value() {
        assert_eq!(call("switch", &["b", "a=1", "b", "c=2"]), Ok("1".into()));
    }

    #[test]
    fn unmatched_test_uses_default() {
        assert_eq!(
            call("switch", &["z", "a=1", "#default = none", "c=3"]),
            Ok("none".into())
        );
        assert_eq!(call("switch", &["z", "a=1", "c=3"]), Ok("3".into()));
    }
}
