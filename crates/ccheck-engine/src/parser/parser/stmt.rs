//! Declarations, blocks and statements

use super::Parser;
use crate::diagnostic::{DiagnosticCode, Severity};
use crate::parser::checker::{SemanticHooks, TypeKind};
use crate::parser::token::{Keyword, TokenKind};

impl<'a, S: SemanticHooks> Parser<'a, S> {
    /// `Function := Type Ident "(" [ParamList] ")" Block`
    pub(super) fn parse_function(&mut self) {
        let ret = self.parse_type();
        let name = self.expect_ident();
        self.sema.begin_function(ret, name.as_ref(), self.diags);

        self.expect_sym("(");
        if !self.check_sym(")") {
            self.parse_param_list();
        }
        self.expect_sym(")");

        // A prototype has no body to parse
        if self.check_sym(";") {
            self.report("missing function body");
            self.advance();
        } else {
            self.parse_block(true);
        }
        self.sema.end_function();
    }

    /// `ParamList := "void" | Type Ident {"," Type Ident}`
    fn parse_param_list(&mut self) {
        if self.check_kw(Keyword::Void) && self.la(1).is_symbol(")") {
            self.advance();
            return;
        }

        loop {
            let ty = self.parse_type();
            if let Some(name) = self.expect_ident() {
                self.sema.declare_param(ty, &name, self.diags);
            }
            if !self.accept_sym(",") {
                break;
            }
        }
    }

    /// `Decl := Type Declarator {"," Declarator} ";"`
    pub(super) fn parse_decl(&mut self) {
        let ty = self.parse_type();
        self.parse_declarator(ty);
        while self.accept_sym(",") {
            self.parse_declarator(ty);
        }
        self.expect_sym(";");
    }

    /// `Declarator := Ident ["=" Expr]`
    ///
    /// The name is declared before the initializer is parsed.
    fn parse_declarator(&mut self, ty: TypeKind) {
        if let Some(name) = self.expect_ident() {
            self.sema.declare_var(ty, &name, self.diags);
        }
        if self.accept_op("=") {
            self.parse_expr();
        }
    }

    /// `Block := "{" { Stmt } "}"`
    ///
    /// A function body shares the layer opened by `begin_function`; any
    /// other block opens its own. A statement that consumes nothing is
    /// reported and its first token skipped.
    fn parse_block(&mut self, function_body: bool) {
        if !function_body {
            self.sema.enter_scope();
        }

        self.expect_sym("{");

        while !self.at_end() && !self.check_sym("}") {
            let start = self.pos;
            self.parse_stmt();
            if self.pos == start {
                self.report(&format!("cannot parse statement starting at {}", self.current()));
                self.advance();
            }
        }

        if self.at_end() {
            self.report("missing '}'");
        } else {
            self.advance();
        }

        if !function_body {
            self.sema.leave_scope();
        }
    }

    fn parse_stmt(&mut self) {
        self.nested("statement", Self::dispatch_stmt);
    }

    /// `Stmt := Decl | ReturnStmt | IfStmt | WhileStmt | ForStmt | BreakStmt | Block | ExprStmt`
    fn dispatch_stmt(&mut self) {
        if self.look_like_type() {
            self.parse_decl();
            return;
        }

        match self.current().kind.clone() {
            TokenKind::Keyword(Keyword::Return) => self.parse_return_stmt(),
            TokenKind::Keyword(Keyword::If) => self.parse_if_stmt(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_stmt(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_stmt(),
            TokenKind::Keyword(Keyword::Break | Keyword::Continue) => self.parse_loop_control(),
            TokenKind::Symbol if self.check_sym("{") => self.parse_block(false),
            _ => self.parse_expr_stmt(),
        }
    }

    /// `ExprStmt := [Expr] ";"`
    fn parse_expr_stmt(&mut self) {
        if !self.check_sym(";") {
            self.parse_expr();
        }
        self.expect_sym(";");
    }

    /// `ReturnStmt := "return" [Expr] ";"`
    ///
    /// The check against the enclosing function runs even when the
    /// statement is missing its `;`.
    fn parse_return_stmt(&mut self) {
        let keyword = self.advance();

        let has_expr = self.is_expr_start();
        if has_expr {
            self.parse_expr();
        }
        self.sema.on_return(&keyword, has_expr, self.diags);

        self.expect_sym(";");
    }

    /// `IfStmt := "if" "(" Expr ")" Stmt ["else" Stmt]`
    ///
    /// An `else if` chain is followed in a loop rather than by nesting.
    fn parse_if_stmt(&mut self) {
        loop {
            self.advance();
            self.parse_condition();
            self.parse_stmt();
            if !self.accept_kw(Keyword::Else) {
                return;
            }
            if !self.check_kw(Keyword::If) {
                self.parse_stmt();
                return;
            }
        }
    }

    /// `WhileStmt := "while" "(" Expr ")" Stmt`
    fn parse_while_stmt(&mut self) {
        self.advance();
        self.parse_condition();
        self.parse_loop_body();
    }

    /// Parenthesised condition of `if`/`while`. A missing `(` is reported and
    /// the condition parsed anyway if one follows; `)` is still required.
    fn parse_condition(&mut self) {
        if self.accept_sym("(") {
            self.parse_expr();
            self.expect_sym(")");
            return;
        }

        self.report("missing '('");
        if self.is_expr_start() {
            self.parse_expr();
        }
        if !self.accept_sym(")") {
            self.report("missing ')'");
        }
    }

    /// `ForStmt := "for" "(" (Decl | ExprStmt | ";") [Expr] ";" [Expr] ")" Stmt`
    ///
    /// The whole statement gets its own scope, so the init declaration is
    /// local to the loop.
    fn parse_for_stmt(&mut self) {
        self.advance();
        self.sema.enter_scope();

        self.expect_sym("(");

        if self.check_sym(";") {
            self.advance();
        } else if self.look_like_type() {
            self.parse_decl();
        } else {
            self.parse_expr_stmt();
        }

        if !self.check_sym(";") {
            self.parse_expr();
        }
        self.expect_sym(";");

        if !self.check_sym(")") {
            self.parse_expr();
        }
        self.expect_sym(")");

        self.parse_loop_body();
        self.sema.leave_scope();
    }

    fn parse_loop_body(&mut self) {
        self.loop_depth += 1;
        self.parse_stmt();
        self.loop_depth -= 1;
    }

    /// `BreakStmt := ("break" | "continue") ";"`
    fn parse_loop_control(&mut self) {
        let keyword = self.advance();
        if self.loop_depth == 0 {
            self.diags.add_at(
                Severity::Error,
                DiagnosticCode::LOOP_CONTROL,
                format!("'{}' outside of a loop", keyword.lexeme),
                &keyword,
            );
        }
        self.expect_sym(";");
    }
}
