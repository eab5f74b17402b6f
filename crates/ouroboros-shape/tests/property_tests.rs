//! Property-based tests for validator invariants

use ouroboros_shape::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn decimal_strings_are_numbers(int in "[0-9]{1,12}", frac in proptest::option::of("[0-9]{0,6}")) {
        let input = match frac {
            Some(frac) => format!("{}.{}", int, frac),
            None => int,
        };
        prop_assert_eq!(number().validate(&Value::from(input.clone())), Ok(Value::from(input)));
    }

    #[test]
    fn strings_with_foreign_characters_are_not_numbers(
        prefix in "[0-9]{0,4}",
        bad in "[^0-9.]",
        suffix in "[0-9]{0,4}",
    ) {
        let input = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(number().validate(&Value::from(input)).is_err());
    }

    #[test]
    fn strings_with_two_separators_are_not_numbers(a in "[0-9]{0,3}", b in "[0-9]{0,3}", c in "[0-9]{0,3}") {
        let input = format!("{}.{}.{}", a, b, c);
        prop_assert!(number().validate(&Value::from(input)).is_err());
    }

    #[test]
    fn range_accepts_exactly_the_closed_interval(
        a in -1.0e6..1.0e6f64,
        width in 1.0e-3..1.0e6f64,
        n in -2.0e6..2.0e6f64,
    ) {
        let b = a + width;
        let validator = number().min(a).unwrap().max(b).unwrap();
        let result = validator.validate(&Value::Number(n));
        prop_assert_eq!(result.is_ok(), a <= n && n <= b);
        if n < a {
            let msg = result.unwrap_err().to_string();
            prop_assert!(msg.contains("at least"), "{}", msg);
        } else if n > b {
            let msg = result.unwrap_err().to_string();
            prop_assert!(msg.contains("at most"), "{}", msg);
        }
    }

    #[test]
    fn string_length_bounds_follow_char_count(s in "\\PC{0,10}") {
        let validator = string().min_length(2).unwrap().max_length(6).unwrap();
        let count = s.chars().count();
        prop_assert_eq!(
            validator.validate(&Value::from(s)).is_ok(),
            (2..=6).contains(&count)
        );
    }

    #[test]
    fn validation_is_idempotent(n in proptest::num::f64::ANY, s in ".{0,8}") {
        let validator = object(
            Schema::new()
                .field("n", number())
                .unwrap()
                .field("s", string().max_length(4).unwrap())
                .unwrap(),
        );
        let value = Value::object([("n", Value::Number(n)), ("s", Value::from(s))]);
        let first = validator.validate(&value);
        let second = validator.validate(&value);
        // NaN payloads compare unequal, so compare the rendered outcome
        prop_assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }

    #[test]
    fn list_fails_iff_some_element_fails(items in proptest::collection::vec(proptest::option::of(0i32..100), 0..12)) {
        let values: Vec<Value> = items.iter().map(|item| Value::from(*item)).collect();
        let failures = items.iter().filter(|item| item.is_none()).count();
        let result = list(number()).validate(&Value::List(values));
        match result {
            Ok(_) => prop_assert_eq!(failures, 0),
            Err(errors) => prop_assert_eq!(errors.count(), failures),
        }
    }
}
