//! Expression parsing
//!
//! One method per precedence level, lowest first. Expressions produce no
//! value; the only side effects are `use_ident` callbacks and syntax
//! diagnostics.

use super::Parser;
use crate::parser::checker::SemanticHooks;
use crate::parser::token::TokenKind;

/// Right-associative assignment operators.
pub const ASSIGN_OPS: &[&str] = &["=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^="];

/// Prefix operators; also what may start an expression besides operands.
pub const UNARY_OPS: &[&str] = &["+", "-", "!", "~", "++", "--", "&", "*"];

impl<'a, S: SemanticHooks> Parser<'a, S> {
    /// `Expr := Assign`
    pub(super) fn parse_expr(&mut self) {
        self.nested("expression", Self::parse_assign);
    }

    /// `Assign := LogicalOr (AssignOp Assign)?`
    ///
    /// Nothing is built, so the right-associative chain is read as a flat
    /// sequence of operands.
    fn parse_assign(&mut self) {
        self.parse_logical_or();
        while self.accept_any_op(ASSIGN_OPS) {
            self.parse_logical_or();
        }
    }

    fn parse_binary(&mut self, operand: fn(&mut Self), ops: &[&str]) {
        operand(self);
        while self.accept_any_op(ops) {
            operand(self);
        }
    }

    fn parse_logical_or(&mut self) {
        self.parse_binary(Self::parse_logical_and, &["||"]);
    }

    fn parse_logical_and(&mut self) {
        self.parse_binary(Self::parse_bit_or, &["&&"]);
    }

    fn parse_bit_or(&mut self) {
        self.parse_binary(Self::parse_bit_xor, &["|"]);
    }

    fn parse_bit_xor(&mut self) {
        self.parse_binary(Self::parse_bit_and, &["^"]);
    }

    fn parse_bit_and(&mut self) {
        self.parse_binary(Self::parse_equality, &["&"]);
    }

    fn parse_equality(&mut self) {
        self.parse_binary(Self::parse_relational, &["==", "!="]);
    }

    fn parse_relational(&mut self) {
        self.parse_binary(Self::parse_shift, &["<", "<=", ">", ">="]);
    }

    fn parse_shift(&mut self) {
        self.parse_binary(Self::parse_additive, &["<<", ">>"]);
    }

    fn parse_additive(&mut self) {
        self.parse_binary(Self::parse_multiplicative, &["+", "-"]);
    }

    fn parse_multiplicative(&mut self) {
        self.parse_binary(Self::parse_unary, &["*", "/", "%"]);
    }

    /// `Unary := UnaryOp Unary | Postfix`
    fn parse_unary(&mut self) {
        while self.accept_any_op(UNARY_OPS) {}
        self.parse_postfix();
    }

    /// `Postfix := Primary ("++" | "--")*`
    fn parse_postfix(&mut self) {
        self.parse_primary();
        while self.accept_any_op(&["++", "--"]) {}
    }

    /// `Primary := Number | String | Char | "(" Expr ")" | Ident ["(" [ArgList] ")"]`
    ///
    /// Anything else is reported as a missing operand. The offending token
    /// is skipped unless it is `;`, `}`, `)` or the end of input.
    fn parse_primary(&mut self) {
        match self.current().kind.clone() {
            TokenKind::Number { .. } | TokenKind::String | TokenKind::Char => {
                self.advance();
            }
            TokenKind::Identifier => {
                let name = self.advance();
                self.sema.use_ident(&name, self.diags);
                if self.accept_sym("(") {
                    if !self.check_sym(")") {
                        self.parse_arg_list();
                    }
                    self.expect_sym(")");
                }
            }
            TokenKind::Symbol if self.check_sym("(") => {
                self.advance();
                self.parse_expr();
                self.expect_sym(")");
            }
            _ => {
                self.report(&format!("expected an expression, found {}", self.current()));
                let stopper =
                    self.at_end() || [";", "}", ")"].iter().any(|sym| self.check_sym(sym));
                if !stopper {
                    self.advance();
                }
            }
        }
    }

    /// `ArgList := Expr {"," Expr}`
    fn parse_arg_list(&mut self) {
        self.parse_expr();
        while self.accept_sym(",") {
            self.parse_expr();
        }
    }
}
