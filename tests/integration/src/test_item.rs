//! Single-item statements: GET, DELETE, INSERT and UPDATE.

#[cfg(test)]
mod tests {
    use dynaql_core::ParseErrorKind;
    use dynaql_core::error::messages;
    use serde_json::json;

    use crate::{compile, compiler};

    #[test]
    fn test_should_compile_get_by_string_and_number_id() {
        assert_eq!(
            compile(r#"GET "a1" FROM users"#),
            json!({"type": "get", "id": "a1", "from": "users"})
        );
        assert_eq!(
            compile("get 42 from users strongly consistent"),
            json!({"type": "get", "id": 42, "from": "users", "stronglyConsistent": true})
        );
    }

    #[test]
    fn test_should_ignore_keyword_case() {
        let expected = json!({"type": "get", "id": 1, "from": "users"});
        for text in ["GET 1 FROM users", "get 1 from users", "Get 1 From users"] {
            assert_eq!(compile(text), expected, "{text}");
        }
        assert_eq!(
            compile("GET 1 FROM users STRONGLY CONSISTENT"),
            compile("get 1 from users strongly   consistent")
        );
    }

    #[test]
    fn test_should_compile_conditional_delete() {
        assert_eq!(
            compile("delete 7 from users where attribute_exists(id) and age >= 18"),
            json!({
                "type": "delete",
                "id": 7,
                "from": "users",
                "where": {
                    "conditionExpression": "attribute_exists(#id) and #age >= :age",
                    "expressionAttributeNames": {"#id": "id", "#age": "age"},
                    "expressionAttributeValues": {":age": 18},
                },
            })
        );
    }

    #[test]
    fn test_should_compile_insert_with_relaxed_json() {
        assert_eq!(
            compile(
                r#"insert {id: 1, name: "Ann", tags: ["a", "b"]} into users
                   where attribute_not_exists(id)"#
            ),
            json!({
                "type": "insert",
                "object": {"id": 1, "name": "Ann", "tags": ["a", "b"]},
                "into": "users",
                "where": {
                    "conditionExpression": "attribute_not_exists(#id)",
                    "expressionAttributeNames": {"#id": "id"},
                    "expressionAttributeValues": {},
                },
            })
        );
    }

    #[test]
    fn test_should_compile_update_with_version_check() {
        assert_eq!(
            compile(r#"update {id: 1, "full name": "Ann Lee"} from users with version check"#),
            json!({
                "type": "update",
                "object": {"id": 1, "full name": "Ann Lee"},
                "from": "users",
                "versionCheck": true,
            })
        );
    }

    #[test]
    fn test_should_report_errors_with_kind_and_message() {
        let mut compiler = compiler();
        let cases = [
            ("get 1", ParseErrorKind::MismatchedToken, messages::GET_MISSING_FROM),
            ("delete", ParseErrorKind::NoViableAlternative, messages::MISSING_OBJECT_ID),
            ("insert 42", ParseErrorKind::MismatchedToken, messages::JSON_INVALID_OBJECT),
            ("insert {id:1}", ParseErrorKind::MismatchedToken, messages::MISSING_ENTITY_NAME),
        ];
        for (input, kind, message) in cases {
            let err = compiler.compile_statement(input).unwrap_err();
            assert_eq!(err.kind(), kind, "kind for {input:?}");
            assert_eq!(err.message(), message, "message for {input:?}");
        }
    }

    #[test]
    fn test_should_report_trailing_and_lexical_errors() {
        let mut compiler = compiler();
        let err = compiler
            .compile_statement(r#"get "a" from users strongly"#)
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NotAllInputParsed);
        assert_eq!(err.message(), "Unexpected token \"strongly\" found.");

        let err = compiler.compile_statement("get 1 from users $").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Lexical);
    }
}
