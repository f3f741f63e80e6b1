//! Table management and metadata statements.

#[cfg(test)]
mod tests {
    use dynaql_core::ParseErrorKind;
    use dynaql_core::error::messages;
    use serde_json::json;

    use crate::{compile, compiler};

    #[test]
    fn test_should_compile_create_table() {
        assert_eq!(
            compile("create table for books"),
            json!({"type": "create_table", "for": "books"})
        );
        assert_eq!(
            compile("CREATE TABLE FOR books WITH CAPACITY OF 5 10"),
            json!({
                "type": "create_table",
                "for": "books",
                "withCapacityOf": {"readCapacity": 5, "writeCapacity": 10},
            })
        );
    }

    #[test]
    fn test_should_compile_other_table_statements() {
        assert_eq!(
            compile("delete table for books"),
            json!({"type": "delete_table", "for": "books"})
        );
        assert_eq!(compile("show tables"), json!({"type": "show_tables"}));
        assert_eq!(
            compile("unload table books"),
            json!({"type": "unload_table", "name": "books"})
        );
        assert_eq!(
            compile("describe books"),
            json!({"type": "describe", "name": "books"})
        );
    }

    #[test]
    fn test_should_unload_instead_of_remove_table() {
        assert_eq!(
            compile("unload table user"),
            json!({"type": "unload_table", "name": "user"})
        );
        let err = compiler().compile_statement("REMOVE TABLE user").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NoViableAlternative);
        assert_eq!(err.message(), "Unrecognized command \"REMOVE\" found.");

        let value = compile("on 1 from t remove table");
        assert_eq!(value["remove"]["removeExpressions"], json!(["#table___1"]));
    }

    #[test]
    fn test_should_wrap_explained_statement() {
        assert_eq!(
            compile("explain find * from books where id = 1"),
            json!({
                "type": "explain",
                "statement": {
                    "type": "find",
                    "from": "books",
                    "where": {
                        "keyConditions": "#id = :id",
                        "expressionAttributeNames": {"#id": "id"},
                        "expressionAttributeValues": {":id": 1},
                    },
                },
            })
        );
    }

    #[test]
    fn test_should_reject_capacity_without_finite_value() {
        let err = compiler()
            .compile_statement("create table for books with capacity of 1 1e999")
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Lexical);
        assert_eq!(err.message(), "Number \"1e999\" is out of range.");

        let err = compiler()
            .compile_statement("create table for books with capacity of 1 18446744073709551616")
            .unwrap_err();
        assert_eq!(err.message(), messages::CREATE_TABLE_MISSING_WRITE_CAPACITY);
    }

    #[test]
    fn test_should_report_missing_capacity() {
        let mut compiler = compiler();
        let err = compiler
            .compile_statement("create table for books with capacity of 1")
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MismatchedToken);
        assert_eq!(err.message(), messages::CREATE_TABLE_MISSING_WRITE_CAPACITY);

        let err = compiler
            .compile_statement("CREATE TABLE for books with capacity of 1,2")
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MismatchedToken);
        assert_eq!(err.message(), messages::CREATE_TABLE_MISSING_READ_CAPACITY);

        let err = compiler.compile_statement("create table users").unwrap_err();
        assert_eq!(err.message(), messages::CREATE_TABLE_MISSING_FOR);
    }
}
