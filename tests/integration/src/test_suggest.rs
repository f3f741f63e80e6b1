//! Next-token suggestions.

#[cfg(test)]
mod tests {
    use crate::compiler;

    #[test]
    fn test_should_suggest_clauses_after_table() {
        assert_eq!(
            compiler().suggest("find * from table"),
            vec![
                "filter",
                "limit",
                "order",
                "resume",
                "strongly consistent",
                "using",
                "where",
            ]
        );
    }

    #[test]
    fn test_should_suggest_statement_openers() {
        assert_eq!(
            compiler().suggest(""),
            vec![
                "create table",
                "delete",
                "delete table",
                "describe",
                "explain",
                "find",
                "get",
                "import",
                "insert",
                "list",
                "on",
                "show tables",
                "unload table",
                "update",
            ]
        );
    }

    #[test]
    fn test_should_suggest_expression_starts_after_filter() {
        assert_eq!(
            compiler().suggest("find * from table filter"),
            vec![
                "(",
                "attribute_exists",
                "attribute_not_exists",
                "attribute_type",
                "begins_with",
                "contains",
                "identifier",
                "not",
                "size",
            ]
        );
    }

    #[test]
    fn test_should_walk_paging_options_to_the_end() {
        let compiler = compiler();
        let base = "find * from table filter a = 1";
        assert_eq!(compiler.suggest(&format!("{base} limit")), vec!["number"]);
        assert_eq!(
            compiler.suggest(&format!("{base} limit 2")),
            vec!["strongly consistent"]
        );
        assert!(compiler.suggest(&format!("{base} limit 2 strongly consistent")).is_empty());
    }

    #[test]
    fn test_should_suggest_required_keyword() {
        let compiler = compiler();
        assert_eq!(compiler.suggest("get 1"), vec!["from"]);
        assert_eq!(compiler.suggest("get 1 from"), vec!["identifier"]);
    }

    #[test]
    fn test_should_not_suggest_after_invalid_input() {
        let compiler = compiler();
        assert!(compiler.suggest("get get").is_empty());
        assert!(compiler.suggest("find * from t where @").is_empty());
        for text in ["x", "find \"a\"", "find * into", "find * from x where 12"] {
            assert!(compiler.suggest(text).is_empty(), "{text}");
        }
    }
}
