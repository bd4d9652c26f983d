//! Templated SQL function calls.
//!
//! [`Func`] is the shared base of every function node: a function name, a
//! template with named placeholders, an argument joiner and the ordered source
//! expressions. Dialect bodies call [`Func::render`] with [`RenderOptions`]
//! to swap the name, template or joiner for one rendering without touching
//! the node itself.

use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use sqlfunc_core::{FieldType, Result, Value};
use std::borrow::Cow;

/// Default template for a function call.
pub const DEFAULT_TEMPLATE: &str = "{function}({expressions})";

/// How compiled arguments are joined into `{expressions}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgJoiner {
    /// `a, b, c`
    #[default]
    Comma,
    /// `k1 VALUE v1, k2 VALUE v2` (SQL/JSON constructor syntax)
    KeyValue,
}

impl ArgJoiner {
    /// Join compiled arguments.
    ///
    /// With `KeyValue`, an odd trailing argument is dropped.
    pub fn join(self, args: &[String]) -> String {
        match self {
            ArgJoiner::Comma => args.join(", "),
            ArgJoiner::KeyValue => args
                .chunks_exact(2)
                .map(|pair| format!("{} VALUE {}", pair[0], pair[1]))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Per-call overrides for [`Func::render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions<'a> {
    pub function: Option<&'a str>,
    pub template: Option<&'a str>,
    pub arg_joiner: Option<ArgJoiner>,
    /// Extra named placeholder values, e.g. `db_type` or `collation`.
    pub extra: Vec<(&'a str, String)>,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(mut self, function: &'a str) -> Self {
        self.function = Some(function);
        self
    }

    pub fn template(mut self, template: &'a str) -> Self {
        self.template = Some(template);
        self
    }

    pub fn arg_joiner(mut self, joiner: ArgJoiner) -> Self {
        self.arg_joiner = Some(joiner);
        self
    }

    /// Set an extra placeholder value.
    pub fn extra(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.extra.push((name, value.into()));
        self
    }
}

/// A generic SQL function call.
///
/// # Example
///
/// ```
/// use sqlfunc_core::ConnectionInfo;
/// use sqlfunc_query::{Expr, Func, compile};
///
/// let upper = Func::new("UPPER", vec![Expr::col("name")]);
/// let fragment = compile(&upper.into(), &ConnectionInfo::sqlite()).unwrap();
/// assert_eq!(fragment.sql, "UPPER(\"name\")");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub function: Cow<'static, str>,
    pub template: Cow<'static, str>,
    pub arg_joiner: ArgJoiner,
    pub source_expressions: Vec<Expr>,
    /// Declared output type; resolved from the sources when `None`.
    pub output_field: Option<FieldType>,
    /// Value this call evaluates to over an empty result set, when known.
    pub empty_result: Option<Value>,
}

impl Func {
    /// Create a function call with the default template.
    pub fn new(function: impl Into<Cow<'static, str>>, source_expressions: Vec<Expr>) -> Self {
        Self {
            function: function.into(),
            template: Cow::Borrowed(DEFAULT_TEMPLATE),
            arg_joiner: ArgJoiner::Comma,
            source_expressions,
            output_field: None,
            empty_result: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_arg_joiner(mut self, joiner: ArgJoiner) -> Self {
        self.arg_joiner = joiner;
        self
    }

    pub fn with_output_field(mut self, output_field: FieldType) -> Self {
        self.output_field = Some(output_field);
        self
    }

    pub fn with_empty_result(mut self, value: impl Into<Value>) -> Self {
        self.empty_result = Some(value.into());
        self
    }

    pub fn source_expressions(&self) -> &[Expr] {
        &self.source_expressions
    }

    /// A copy of this call over different source expressions.
    pub fn with_source_expressions(&self, source_expressions: Vec<Expr>) -> Self {
        Self {
            function: self.function.clone(),
            template: self.template.clone(),
            arg_joiner: self.arg_joiner,
            source_expressions,
            output_field: self.output_field.clone(),
            empty_result: self.empty_result.clone(),
        }
    }

    /// The declared output type, or the common type of the sources.
    ///
    /// Sources with no known type are skipped. Sources of different kinds
    /// resolve to `None`.
    pub fn resolve_output_field(&self) -> Option<FieldType> {
        if let Some(field) = &self.output_field {
            return Some(field.clone());
        }
        let mut resolved: Option<FieldType> = None;
        for field in self.source_expressions.iter().filter_map(Expr::output_field) {
            let Some(current) = &resolved else {
                resolved = Some(field);
                continue;
            };
            if current.internal_type() != field.internal_type() {
                return None;
            }
        }
        resolved
    }

    /// Compile the sources and fill in the template.
    ///
    /// Sources are compiled left to right before substitution, so bound
    /// parameters follow source order.
    pub fn render(
        &self,
        compiler: &mut SqlCompiler<'_>,
        options: RenderOptions<'_>,
    ) -> Result<String> {
        let mut args = Vec::with_capacity(self.source_expressions.len());
        for expr in &self.source_expressions {
            args.push(compiler.compile(expr)?);
        }
        let expressions = options.arg_joiner.unwrap_or(self.arg_joiner).join(&args);
        let function = options.function.unwrap_or(self.function.as_ref());
        let template = options.template.unwrap_or(self.template.as_ref());

        let mut values: Vec<(&str, &str)> = Vec::with_capacity(options.extra.len() + 2);
        values.push(("function", function));
        values.push(("expressions", &expressions));
        for (name, value) in &options.extra {
            values.push((*name, value.as_str()));
        }
        Ok(render_template(template, &values))
    }
}

impl DialectRender for Func {
    const NAME: &'static str = "Func";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.render(compiler, RenderOptions::default())
    }
}

/// Substitute `{name}` placeholders in one pass.
///
/// Substituted text is not scanned again. Unknown placeholders and unmatched
/// braces are copied through unchanged.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
