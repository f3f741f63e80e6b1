//! Standalone expressions, key conditions and JSON objects.

#[cfg(test)]
mod tests {
    use dynaql_core::ParseErrorKind;
    use dynaql_model::ExpressionFragment;
    use serde_json::json;

    use crate::compiler;

    #[test]
    fn test_should_compile_condition_expression() {
        let fragment = compiler()
            .compile_expression(r#"not (status in ("a", "b") or size(tags) > 3)"#)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({
                "expression": "not (#status in (:status_in_1,:status_in_2) or size(#tags) > :tags)",
                "expressionAttributeNames": {"#status": "status", "#tags": "tags"},
                "expressionAttributeValues": {
                    ":status_in_1": "a",
                    ":status_in_2": "b",
                    ":tags": 3,
                },
            })
        );
    }

    #[test]
    fn test_should_compile_key_condition() {
        let fragment = compiler()
            .compile_key_condition(r#"(id = "u1") and created <= 5"#)
            .unwrap();
        assert_eq!(
            fragment,
            ExpressionFragment {
                expression: "(#id = :id) and #created <= :created".to_owned(),
                expression_attribute_names: [
                    ("#id".to_owned(), "id".to_owned()),
                    ("#created".to_owned(), "created".to_owned()),
                ]
                .into_iter()
                .collect(),
                expression_attribute_values: [
                    (":id".to_owned(), json!("u1")),
                    (":created".to_owned(), json!(5)),
                ]
                .into_iter()
                .collect(),
            }
        );
    }

    #[test]
    fn test_should_reject_functions_in_key_condition() {
        let err = compiler()
            .compile_key_condition(r#"begins_with(id, "u")"#)
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NoViableAlternative);
    }

    #[test]
    fn test_should_parse_json_object() {
        let value = compiler()
            .parse_json_object(r#"{id: 1, "name": "x", limit: 2.5, meta: {ok: false, none: null}}"#)
            .unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "x", "limit": 2.5, "meta": {"ok": false, "none": null}})
        );
    }
}
