use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{Func, RenderOptions};
use regex::Regex;
use sqlfunc_core::{Error, FieldType, Result, ValidationErrorKind};
use std::sync::OnceLock;

/// Letters, digits, underscore and hyphen.
const COLLATION_PATTERN: &str = r"^[\w-]+$";

fn collation_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| match Regex::new(COLLATION_PATTERN) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid collation pattern, rejecting all names");
                None
            }
        })
        .as_ref()
}

/// `<expr> COLLATE <collation>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Collate {
    func: Func,
    collation: String,
}

impl Collate {
    /// Fails with `InvalidCollation` unless the name is a bare word.
    pub fn new(expression: impl Into<Expr>, collation: impl Into<String>) -> Result<Self> {
        let collation = collation.into();
        let valid = !collation.is_empty()
            && collation_regex().is_some_and(|regex| regex.is_match(&collation));
        if !valid {
            return Err(Error::validation(
                Self::NAME,
                ValidationErrorKind::InvalidCollation,
                format!("Invalid collation name: {collation:?}."),
            ));
        }
        Ok(Self {
            func: Func::new("COLLATE", vec![expression.into()])
                .with_template("{expressions} {function} {collation}"),
            collation,
        })
    }

    pub fn collation(&self) -> &str {
        &self.collation
    }

    pub fn output_field(&self) -> Option<FieldType> {
        self.func.resolve_output_field()
    }
}

impl DialectRender for Collate {
    const NAME: &'static str = "Collate";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        let collation = compiler.quote_name(&self.collation);
        self.func
            .render(compiler, RenderOptions::new().extra("collation", collation))
    }
}
