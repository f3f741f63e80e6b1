//! Statement rules.

use super::Parser;
use super::cst::{
    Action, AtomicStatement, CreateTable, Delete, DeleteTable, Expression, Find, Get, Import,
    ImportGroup, ImportItem, Insert, List, ObjectId, On, PageOptions, Projections, Statement,
    Update,
};
use crate::error::{ParseResult, messages};
use crate::token::TokenKind;

const STATEMENT_STARTS: &[TokenKind] = &[
    TokenKind::Get,
    TokenKind::Delete,
    TokenKind::Find,
    TokenKind::List,
    TokenKind::Insert,
    TokenKind::Update,
    TokenKind::On,
    TokenKind::CreateTable,
    TokenKind::DeleteTable,
    TokenKind::ShowTables,
    TokenKind::UnloadTable,
    TokenKind::Import,
    TokenKind::Describe,
];

const ACTION_STARTS: &[TokenKind] = &[
    TokenKind::Set,
    TokenKind::Add,
    TokenKind::Remove,
    TokenKind::Delete,
];

impl Parser<'_> {
    /// `statement := EXPLAIN atomic | atomic`
    pub(super) fn statement(&mut self) -> ParseResult<Statement> {
        if self.eat(TokenKind::Explain).is_some() {
            return self.atomic_statement().map(Statement::Explain);
        }
        self.atomic_statement().map(Statement::Atomic)
    }

    fn atomic_statement(&mut self) -> ParseResult<AtomicStatement> {
        let Some(kind) = self.lookahead(STATEMENT_STARTS) else {
            return Err(self.no_viable(None));
        };
        self.advance();
        match kind {
            TokenKind::Get => self.get().map(AtomicStatement::Get),
            TokenKind::Delete => self.delete().map(AtomicStatement::Delete),
            TokenKind::Find => self.find().map(AtomicStatement::Find),
            TokenKind::List => self.list().map(AtomicStatement::List),
            TokenKind::Insert => self.insert().map(AtomicStatement::Insert),
            TokenKind::Update => self.update().map(AtomicStatement::Update),
            TokenKind::On => self.on().map(AtomicStatement::On),
            TokenKind::CreateTable => self.create_table().map(AtomicStatement::CreateTable),
            TokenKind::DeleteTable => self.delete_table().map(AtomicStatement::DeleteTable),
            TokenKind::ShowTables => Ok(AtomicStatement::ShowTables),
            TokenKind::UnloadTable => self
                .consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)
                .map(AtomicStatement::UnloadTable),
            TokenKind::Import => self.import().map(AtomicStatement::Import),
            _ => self
                .consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)
                .map(AtomicStatement::Describe),
        }
    }

    // -----------------------------------------------------------------------
    // Item statements
    // -----------------------------------------------------------------------

    fn get(&mut self) -> ParseResult<Get> {
        let id = self.object_id()?;
        self.consume(TokenKind::From, Some(messages::GET_MISSING_FROM))?;
        let table = self.consume_image(TokenKind::Identifier, messages::GET_MISSING_TABLE)?;
        let strongly_consistent = self.eat(TokenKind::StronglyConsistent).is_some();
        Ok(Get {
            id,
            table,
            strongly_consistent,
        })
    }

    fn delete(&mut self) -> ParseResult<Delete> {
        let id = self.object_id()?;
        self.consume(TokenKind::From, Some(messages::DELETE_MISSING_FROM))?;
        let table = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;
        let condition = self.where_clause()?;
        Ok(Delete {
            id,
            table,
            condition,
        })
    }

    fn insert(&mut self) -> ParseResult<Insert> {
        let object = self.json_object()?;
        self.consume(TokenKind::Into, Some(messages::MISSING_ENTITY_NAME))?;
        let table = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;
        let condition = self.where_clause()?;
        Ok(Insert {
            object,
            table,
            condition,
        })
    }

    fn update(&mut self) -> ParseResult<Update> {
        let object = self.json_object()?;
        self.consume(TokenKind::From, Some(messages::MISSING_ENTITY_NAME))?;
        let table = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;
        let condition = self.where_clause()?;
        let version_check = self.eat(TokenKind::WithVersionCheck).is_some();
        Ok(Update {
            object,
            table,
            condition,
            version_check,
        })
    }

    fn on(&mut self) -> ParseResult<On> {
        let id = self.object_id()?;
        self.consume(TokenKind::From, Some(messages::ON_MISSING_FROM))?;
        let table = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;

        let mut actions = Vec::new();
        while let Some(kind) = self.lookahead(ACTION_STARTS) {
            self.advance();
            self.action_clause(kind, &mut actions)?;
        }
        if actions.is_empty() {
            return Err(self.no_viable(Some(messages::OR_MISSING_EXPRESSION)));
        }

        let condition = self.where_clause()?;
        let version_check = self.eat(TokenKind::WithVersionCheck).is_some();
        Ok(On {
            id,
            table,
            actions,
            condition,
            version_check,
        })
    }

    /// One SET/ADD/REMOVE/DELETE clause; its keyword is already consumed.
    fn action_clause(&mut self, kind: TokenKind, actions: &mut Vec<Action>) -> ParseResult<()> {
        loop {
            let name = self.property_name()?;
            let action = match kind {
                TokenKind::Set => {
                    self.consume(TokenKind::Equal, Some(messages::ON_SET_MISSING_EQUAL))?;
                    Action::Set {
                        name,
                        value: self.atomic(None)?,
                    }
                }
                TokenKind::Add => Action::Add {
                    value: self.consume_image(TokenKind::Number, messages::ON_ADD_MISSING_NUMBER)?,
                    name,
                },
                TokenKind::Remove => Action::Remove { name },
                _ => Action::Delete {
                    name,
                    value: self.atomic(Some(messages::ON_DELETE_MISSING_VALUE))?,
                },
            };
            actions.push(action);
            if self.eat(TokenKind::Comma).is_none() {
                return Ok(());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn find(&mut self) -> ParseResult<Find> {
        let projections = self.projections()?;
        let (table, index) = self.source()?;
        let key_condition = if self.eat(TokenKind::Where).is_some() {
            Some(self.key_condition()?)
        } else {
            None
        };
        let filter = self.filter_clause()?;
        let page = self.page_options()?;
        Ok(Find {
            projections,
            table,
            index,
            key_condition,
            filter,
            page,
        })
    }

    fn list(&mut self) -> ParseResult<List> {
        let projections = self.projections()?;
        let (table, index) = self.source()?;
        let by = if self.eat(TokenKind::By).is_some() {
            let hash = self.consume_image(TokenKind::String, messages::LIST_MISSING_BY_HASH)?;
            let range = if self.eat(TokenKind::Comma).is_some() {
                Some(self.consume_image(TokenKind::String, messages::LIST_MISSING_BY_RANGE)?)
            } else {
                None
            };
            Some((hash, range))
        } else {
            None
        };
        let filter = self.filter_clause()?;
        let page = self.page_options()?;
        Ok(List {
            projections,
            table,
            index,
            by,
            filter,
            page,
        })
    }

    fn projections(&mut self) -> ParseResult<Projections> {
        match self.lookahead(&[TokenKind::Star, TokenKind::Identifier]) {
            Some(TokenKind::Star) => {
                self.advance();
                Ok(Projections::All)
            }
            Some(_) => {
                let mut names = vec![self.property_name()?];
                while self.eat(TokenKind::Comma).is_some() {
                    names.push(
                        self.consume_image(TokenKind::Identifier, messages::FIND_MISSING_PROJECTION)?,
                    );
                }
                Ok(Projections::Properties(names))
            }
            None => Err(self.no_viable(Some(messages::FIND_MISSING_PROJECTIONS))),
        }
    }

    /// `FROM table (USING index)?`
    fn source(&mut self) -> ParseResult<(String, Option<String>)> {
        self.consume(TokenKind::From, Some(messages::FIND_MISSING_FROM))?;
        let table = self.consume_image(TokenKind::Identifier, messages::FIND_MISSING_TABLE)?;
        let index = if self.eat(TokenKind::Using).is_some() {
            Some(self.consume_image(TokenKind::Identifier, messages::FIND_MISSING_USING)?)
        } else {
            None
        };
        Ok((table, index))
    }

    fn page_options(&mut self) -> ParseResult<PageOptions> {
        let mut page = PageOptions::default();
        if self.eat(TokenKind::Resume).is_some() {
            page.resume =
                Some(self.consume_image(TokenKind::String, messages::FIND_MISSING_RESUME)?);
        }
        if self.eat(TokenKind::Order).is_some() {
            let Some(direction) = self.lookahead(&[TokenKind::Asc, TokenKind::Desc]) else {
                return Err(self.no_viable(Some(messages::FIND_MISSING_ORDER)));
            };
            self.advance();
            page.ascending = Some(direction == TokenKind::Asc);
        }
        if self.eat(TokenKind::Limit).is_some() {
            page.limit = Some(self.consume_image(TokenKind::Number, messages::FIND_MISSING_LIMIT)?);
        }
        page.strongly_consistent = self.eat(TokenKind::StronglyConsistent).is_some();
        Ok(page)
    }

    fn where_clause(&mut self) -> ParseResult<Option<Expression>> {
        if self.eat(TokenKind::Where).is_some() {
            self.expression().map(Some)
        } else {
            Ok(None)
        }
    }

    fn filter_clause(&mut self) -> ParseResult<Option<Expression>> {
        if self.eat(TokenKind::Filter).is_some() {
            self.expression().map(Some)
        } else {
            Ok(None)
        }
    }

    // -----------------------------------------------------------------------
    // Table management
    // -----------------------------------------------------------------------

    fn create_table(&mut self) -> ParseResult<CreateTable> {
        self.consume(TokenKind::For, Some(messages::CREATE_TABLE_MISSING_FOR))?;
        let entity = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;
        let capacity = if self.eat(TokenKind::WithCapacityOf).is_some() {
            let read = self.integer(messages::CREATE_TABLE_MISSING_READ_CAPACITY)?;
            // Capacities are separated by whitespace only.
            if self.peek().is_some_and(|t| t.kind == TokenKind::Comma) {
                return Err(self.formatter.mismatched_token(
                    Some(messages::CREATE_TABLE_MISSING_READ_CAPACITY),
                    self.peek(),
                ));
            }
            let write = self.integer(messages::CREATE_TABLE_MISSING_WRITE_CAPACITY)?;
            Some((read, write))
        } else {
            None
        };
        Ok(CreateTable { entity, capacity })
    }

    fn delete_table(&mut self) -> ParseResult<DeleteTable> {
        self.consume(TokenKind::For, Some(messages::DELETE_TABLE_MISSING_FOR))?;
        let entity =
            self.consume_image(TokenKind::Identifier, messages::DELETE_TABLE_MISSING_ENTITY_NAME)?;
        Ok(DeleteTable { entity })
    }

    /// Integer literal that fits in a `u64`.
    fn integer(&mut self, custom: &str) -> ParseResult<String> {
        let token = self
            .peek()
            .filter(|t| t.kind == TokenKind::Number && t.image.parse::<u64>().is_ok());
        if token.is_none() {
            return Err(self.formatter.mismatched_token(Some(custom), self.peek()));
        }
        self.consume_image(TokenKind::Number, custom)
    }

    fn import(&mut self) -> ParseResult<Import> {
        let mut groups = vec![self.import_group()?];
        while self.eat(TokenKind::Comma).is_some() {
            groups.push(self.import_group()?);
        }
        self.consume(TokenKind::From, Some(messages::IMPORT_MISSING_FROM))?;
        let package = self.consume_image(TokenKind::String, messages::IMPORT_MISSING_PACKAGE_NAME)?;
        Ok(Import { groups, package })
    }

    fn import_group(&mut self) -> ParseResult<ImportGroup> {
        match self.lookahead(&[TokenKind::Identifier, TokenKind::LeftCurly]) {
            Some(TokenKind::Identifier) => self.import_item().map(ImportGroup::Default),
            Some(_) => {
                self.advance();
                let mut items = vec![self.import_item()?];
                while self.eat(TokenKind::Comma).is_some() {
                    items.push(self.import_item()?);
                }
                self.consume(
                    TokenKind::RightCurly,
                    Some(messages::IMPORT_MISSING_CLOSING_BRACE),
                )?;
                Ok(ImportGroup::Named(items))
            }
            None => Err(self.no_viable(Some(messages::MISSING_ENTITY_NAME))),
        }
    }

    fn import_item(&mut self) -> ParseResult<ImportItem> {
        let name = self.consume_image(TokenKind::Identifier, messages::MISSING_ENTITY_NAME)?;
        let alias = if self.eat(TokenKind::As).is_some() {
            Some(self.consume_image(TokenKind::Identifier, messages::IMPORT_MISSING_ALIAS)?)
        } else {
            None
        };
        Ok(ImportItem { name, alias })
    }

    fn object_id(&mut self) -> ParseResult<ObjectId> {
        let Some(kind) = self.lookahead(&[TokenKind::String, TokenKind::Number]) else {
            return Err(self.no_viable(Some(messages::MISSING_OBJECT_ID)));
        };
        let image = self.advance().map(|t| t.image.clone()).unwrap_or_default();
        Ok(if kind == TokenKind::String {
            ObjectId::String(image)
        } else {
            ObjectId::Number(image)
        })
    }
}
