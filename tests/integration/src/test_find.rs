//! FIND and LIST queries.

#[cfg(test)]
mod tests {
    use dynaql_model::Statement;
    use serde_json::json;

    use crate::{compile, compiler};

    #[test]
    fn test_should_compile_find_with_every_clause() {
        assert_eq!(
            compile(
                r#"find name, age from users using age-index
                   where id = "u1" and created > 100
                   filter active = true
                   resume "tok" order desc limit 10 strongly consistent"#
            ),
            json!({
                "type": "find",
                "projections": ["name", "age"],
                "from": "users",
                "using": "age-index",
                "where": {
                    "keyConditions": "#id = :id and #created > :created",
                    "expressionAttributeNames": {"#id": "id", "#created": "created"},
                    "expressionAttributeValues": {":id": "u1", ":created": 100},
                },
                "filter": {
                    "filterExpression": "#active = :active",
                    "expressionAttributeNames": {"#active": "active"},
                    "expressionAttributeValues": {":active": true},
                },
                "resume": "tok",
                "order": false,
                "limit": 10,
                "stronglyConsistent": true,
            })
        );
    }

    #[test]
    fn test_should_ignore_surrounding_and_repeated_whitespace() {
        assert_eq!(compile("find * from user"), json!({"type": "find", "from": "user"}));
        assert_eq!(compile("   find   *   from   user   "), compile("find * from user"));
        assert_eq!(
            compile("find name,age from user\n\twhere id = 1"),
            compile("find name , age from user where id=1")
        );
    }

    #[test]
    fn test_should_keep_filter_placeholders_apart_from_key_condition() {
        let value = compile("find * from users where id = 1 filter id <> 2");
        assert_eq!(value["where"]["keyConditions"], json!("#id = :id"));
        assert_eq!(value["filter"]["filterExpression"], json!("#id___1 <> :id___1"));
        assert_eq!(
            value["filter"]["expressionAttributeValues"],
            json!({":id___1": 2})
        );
    }

    #[test]
    fn test_should_compile_list_scan() {
        assert_eq!(
            compile(r#"list * from users by "id", "created" filter age between 18 and 65 order asc limit 5"#),
            json!({
                "type": "list",
                "from": "users",
                "by": {"hash": "id", "range": "created"},
                "filter": {
                    "filterExpression": "#age between :age_between_1 and :age_between_2",
                    "expressionAttributeNames": {"#age": "age"},
                    "expressionAttributeValues": {":age_between_1": 18, ":age_between_2": 65},
                },
                "order": true,
                "limit": 5,
            })
        );
    }

    #[test]
    fn test_should_carry_collision_index_between_statements() {
        let mut compiler = compiler();
        let text = "find * from t where a = 1 or a = 2";
        let first = compiler.compile_statement(text).unwrap();
        let second = compiler.compile_statement(text).unwrap();
        let key = |statement: Statement| {
            serde_json::to_value(statement).unwrap()["where"]["keyConditions"].clone()
        };
        assert_eq!(key(first), json!("#a = :a or #a___1 = :a___1"));
        assert_eq!(key(second), json!("#a = :a or #a___2 = :a___2"));

        compiler.reset_collision_index();
        let third = compiler.compile_statement(text).unwrap();
        assert_eq!(key(third), json!("#a = :a or #a___1 = :a___1"));
    }
}
