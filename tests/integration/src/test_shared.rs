//! The process-wide compiler behind the free functions.

#[cfg(test)]
mod tests {
    use dynaql_core::ParseErrorKind;
    use serde_json::json;

    // One test only: every free function shares a single collision index.
    #[test]
    fn test_should_share_collision_index_across_free_functions() {
        let key = |text: &str| {
            let statement = dynaql_core::compile_statement(text).unwrap();
            serde_json::to_value(statement).unwrap()["where"]["keyConditions"].clone()
        };
        let text = "find * from t where a = 1 or a = 2";

        dynaql_core::reset_collision_index();
        assert_eq!(key(text), json!("#a = :a or #a___1 = :a___1"));
        assert_eq!(key(text), json!("#a = :a or #a___2 = :a___2"));

        let fragment = dynaql_core::compile_expression("b = 1 and b = 2").unwrap();
        assert_eq!(fragment.expression, "#b = :b and #b___3 = :b___3");

        dynaql_core::reset_collision_index();
        assert_eq!(key(text), json!("#a = :a or #a___1 = :a___1"));

        let fragment = dynaql_core::compile_key_condition("id = 1").unwrap();
        assert_eq!(fragment.expression, "#id = :id");
        assert_eq!(
            dynaql_core::parse_json_object("{id: 1, tags: [\"a\"]}").unwrap(),
            json!({"id": 1, "tags": ["a"]})
        );
        assert_eq!(dynaql_core::suggest("get 1"), vec!["from"]);

        let err = dynaql_core::compile_statement("get 1").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MismatchedToken);
    }
}
