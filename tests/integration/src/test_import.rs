//! IMPORT statements.

#[cfg(test)]
mod tests {
    use dynaql_core::error::messages;
    use serde_json::json;

    use crate::{compile, compiler};

    #[test]
    fn test_should_flatten_default_and_named_imports() {
        assert_eq!(
            compile(r#"import users, {Customer as C, Item} from "./models""#),
            json!({
                "type": "import",
                "entity": [
                    {"name": "users", "as": "users", "default": true},
                    {"name": "Customer", "as": "C", "default": false},
                    {"name": "Item", "as": "Item", "default": false},
                ],
                "from": "./models",
            })
        );
    }

    #[test]
    fn test_should_key_single_import_under_entity() {
        assert_eq!(
            compile(r#"import user from "./user""#),
            json!({
                "type": "import",
                "entity": [{"name": "user", "as": "user", "default": true}],
                "from": "./user",
            })
        );
    }

    #[test]
    fn test_should_alias_default_import() {
        let value = compile(r#"import users as u from "pkg""#);
        assert_eq!(
            value["entity"],
            json!([{"name": "users", "as": "u", "default": true}])
        );
    }

    #[test]
    fn test_should_require_quoted_package() {
        let err = compiler()
            .compile_statement("import a from b")
            .unwrap_err();
        assert_eq!(err.message(), messages::IMPORT_MISSING_PACKAGE_NAME);
    }
}
