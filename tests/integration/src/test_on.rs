//! ON statements: in-place update actions.

#[cfg(test)]
mod tests {
    use dynaql_core::ParseErrorKind;
    use dynaql_core::error::messages;
    use serde_json::json;

    use crate::{compile, compiler};

    #[test]
    fn test_should_compile_set_actions_with_condition() {
        assert_eq!(
            compile(
                r#"on "1" from users set name = "some one", age = 25
                   where begins_with(name, "so") with version check"#
            ),
            json!({
                "type": "on",
                "id": "1",
                "from": "users",
                "set": {
                    "setExpressions": ["#name___1 = :name___1", "#age___2 = :age___2"],
                    "expressionAttributeNames": {"#name___1": "name", "#age___2": "age"},
                    "expressionAttributeValues": {":name___1": "some one", ":age___2": 25},
                },
                "where": {
                    "conditionExpression": "begins_with(#name,:name)",
                    "expressionAttributeNames": {"#name": "name"},
                    "expressionAttributeValues": {":name": "so"},
                },
                "versionCheck": true,
            })
        );
    }

    #[test]
    fn test_should_group_actions_by_kind() {
        let value = compile(r#"on 3 from users add visits 1 remove nickname delete tags "old""#);
        assert_eq!(
            value["add"],
            json!({
                "addExpressions": ["#visits___1 :visits___1"],
                "expressionAttributeNames": {"#visits___1": "visits"},
                "expressionAttributeValues": {":visits___1": 1},
            })
        );
        assert_eq!(value["remove"]["removeExpressions"], json!(["#nickname___2"]));
        assert_eq!(value["delete"]["deleteExpressions"], json!(["#tags___3 :tags___3"]));
        assert!(value.get("set").is_none());
    }

    #[test]
    fn test_should_number_repeated_attribute_per_action() {
        let value = compile("on 1 from users set count = 1 add count 2");
        assert_eq!(
            value["set"],
            json!({
                "setExpressions": ["#count___1 = :count___1"],
                "expressionAttributeNames": {"#count___1": "count"},
                "expressionAttributeValues": {":count___1": 1},
            })
        );
        assert_eq!(
            value["add"],
            json!({
                "addExpressions": ["#count___2 :count___2"],
                "expressionAttributeNames": {"#count___2": "count"},
                "expressionAttributeValues": {":count___2": 2},
            })
        );
    }

    #[test]
    fn test_should_keep_plain_placeholders_when_where_reuses_action_attribute() {
        let value = compile("on 1 from users set age = 30 where age < 30");
        assert_eq!(value["set"]["setExpressions"], json!(["#age___1 = :age___1"]));
        assert_eq!(
            value["where"],
            json!({
                "conditionExpression": "#age < :age",
                "expressionAttributeNames": {"#age": "age"},
                "expressionAttributeValues": {":age": 30},
            })
        );
    }

    #[test]
    fn test_should_require_an_action() {
        for text in ["on 1 from users", "on 1 from users where a = 1"] {
            let err = compiler().compile_statement(text).unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::NoViableAlternative);
            assert_eq!(err.message(), messages::OR_MISSING_EXPRESSION);
        }
    }
}
