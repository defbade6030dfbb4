//! Builds an [`AssertLine`] tree from a live value.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, trace};

use crate::config::AssertGeneratorConfig;
use crate::errors::{AccessorError, GenerateError, GenerateResult};
use crate::inspect::{Accessor, Identity, Inspect, Literal, Shape, Value};
use crate::lines::AssertLine;

/// Walks values through their [`Inspect`] accessors and emits assertion lines.
///
/// Holds only immutable configuration, so one generator can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct AssertGenerator {
    config: AssertGeneratorConfig,
}

impl AssertGenerator {
    pub fn new(config: AssertGeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssertGeneratorConfig {
        &self.config
    }

    /// Generate the assertion tree for `value`, labelled `variable_name`.
    ///
    /// Returns `Ok(None)` when the value's type is not meaningful to assert on.
    /// Failing accessors become comment lines; only introspection failures and
    /// cycles abort the walk.
    pub fn generate(&self, value: &dyn Inspect, variable_name: &str) -> GenerateResult<Option<AssertLine>> {
        if variable_name.trim().is_empty() {
            return Err(GenerateError::BlankVariableName);
        }
        debug!("generating assertions for `{variable_name}` ({})", value.type_name());

        match value.shape() {
            Shape::Null => Ok(Some(AssertLine::null(variable_name))),
            Shape::Ignored => Ok(None),
            shape => {
                let mut root = AssertLine::not_null(variable_name);
                let mut ancestors = Ancestors::default();
                self.traverse(value, shape, &mut root, &mut ancestors)?;
                Ok(Some(root))
            }
        }
    }

    /// Render a tree with the configured indentation.
    pub fn render(&self, line: &AssertLine) -> String {
        line.render(self.config.indentation())
    }

    /// Generate and render in one step.
    pub fn generate_text(&self, value: &dyn Inspect, variable_name: &str) -> GenerateResult<Option<String>> {
        Ok(self.generate(value, variable_name)?.map(|line| self.render(&line)))
    }

    /// Generate, then write the rendered tree to `sink` framed by blank lines.
    pub fn print_to<W: Write>(
        &self,
        value: &dyn Inspect,
        variable_name: &str,
        sink: &mut W,
    ) -> GenerateResult<Option<AssertLine>> {
        let line = self.generate(value, variable_name)?;
        if let Some(line) = &line {
            write!(sink, "\n\n{}\n\n\n", self.render(line))?;
            sink.flush()?;
        }
        Ok(line)
    }

    fn traverse(
        &self,
        value: &dyn Inspect,
        shape: Shape<'_>,
        container: &mut AssertLine,
        ancestors: &mut Ancestors,
    ) -> GenerateResult<()> {
        match shape {
            Shape::Object => {
                ancestors.enter(value, container.path())?;
                let result = self.traverse_object(value, container, ancestors);
                ancestors.leave();
                result
            }
            Shape::List(items) => {
                ancestors.enter(value, container.path())?;
                let result = self.traverse_list(&items, container, ancestors);
                ancestors.leave();
                result
            }
            _ => Ok(()),
        }
    }

    fn traverse_object(
        &self,
        value: &dyn Inspect,
        container: &mut AssertLine,
        ancestors: &mut Ancestors,
    ) -> GenerateResult<()> {
        let type_name = value.type_name();
        let accessors = if self.config.is_scan_all(type_name) {
            trace!("scanning all methods of {type_name}");
            value.methods()
        } else {
            value.properties()
        }
        .map_err(|source| GenerateError::Introspection { type_name, source })?;

        for accessor in accessors {
            if self.config.is_ignored_method(accessor.name()) {
                continue;
            }

            let path = format!("{}.{}", container.path(), accessor.segment());
            match invoke(accessor) {
                Ok(result) => self.visit(&*result, path, container, ancestors)?,
                Err(err) => {
                    debug!("{path} failed: {err}");
                    container.push(AssertLine::comment(path, err.description));
                }
            }
        }
        Ok(())
    }

    fn traverse_list(
        &self,
        items: &[Value<'_>],
        container: &mut AssertLine,
        ancestors: &mut Ancestors,
    ) -> GenerateResult<()> {
        let size_path = format!("{}.size()", container.path());
        container.push(AssertLine::equals(size_path, Literal::number(items.len())));

        for (index, item) in items.iter().enumerate() {
            let path = format!("{}.get({index})", container.path());
            self.visit(&**item, path, container, ancestors)?;
        }
        Ok(())
    }

    /// Emit the line for one accessor result or list element.
    fn visit(
        &self,
        value: &dyn Inspect,
        path: String,
        container: &mut AssertLine,
        ancestors: &mut Ancestors,
    ) -> GenerateResult<()> {
        match value.shape() {
            Shape::Null => container.push(AssertLine::null(path)),
            Shape::Scalar(literal) => container.push(AssertLine::equals(path, literal)),
            Shape::Ignored => trace!("skipping {path}: ignored type {}", value.type_name()),
            Shape::Set => trace!("skipping {path}: unordered collection"),
            shape => {
                let mut line = AssertLine::not_null(path);
                self.traverse(value, shape, &mut line, ancestors)?;
                container.push(line);
            }
        }
        Ok(())
    }
}

/// A panicking accessor is reported like one that returned an error.
fn invoke(accessor: Accessor<'_>) -> Result<Value<'_>, AccessorError> {
    panic::catch_unwind(AssertUnwindSafe(|| accessor.invoke()))
        .unwrap_or_else(|payload| Err(AccessorError::from_panic(payload)))
}

/// Identities of the values enclosing the current position of the walk.
#[derive(Debug, Default)]
struct Ancestors {
    stack: Vec<Identity>,
}

impl Ancestors {
    fn enter(&mut self, value: &dyn Inspect, path: &str) -> GenerateResult<()> {
        let identity = value.identity();
        if self.stack.contains(&identity) {
            return Err(GenerateError::CyclicGraph {
                path: path.to_string(),
                type_name: identity.type_name(),
            });
        }
        self.stack.push(identity);
        Ok(())
    }

    fn leave(&mut self) {
        self.stack.pop();
    }
}

/// Generate with the default configuration.
pub fn generate(value: &dyn Inspect, variable_name: &str) -> GenerateResult<Option<AssertLine>> {
    AssertGenerator::default().generate(value, variable_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inspect;

    #[derive(Inspect)]
    #[inspect(property(checksum, fallible))]
    struct Probe {
        reading: Option<f64>,
        unit: &'static str,
    }

    impl Probe {
        fn checksum(&self) -> Result<u8, String> {
            Err(format!("sensor {} offline", self.unit))
        }
    }

    #[test]
    fn derived_values_walk_fields_then_computed_properties() {
        let probe = Probe {
            reading: None,
            unit: "kPa",
        };
        let line = generate(&probe, "probe").expect("generates").expect("not ignored");
        assert_eq!(
            line.children(),
            &[
                AssertLine::null("probe.reading()"),
                AssertLine::equals("probe.unit()", Literal::Text("kPa".into())),
                AssertLine::comment("probe.checksum()", "sensor kPa offline"),
            ]
        );
    }

    #[test]
    fn blank_label_is_rejected() {
        let err = generate(&1u8, "  ").expect_err("blank label");
        assert!(matches!(err, GenerateError::BlankVariableName));
    }

    #[test]
    fn root_scalar_is_a_bare_not_null() {
        let line = generate(&"A100".to_string(), "code").expect("generates").expect("not ignored");
        assert_eq!(line, AssertLine::not_null("code"));
    }

    #[test]
    fn root_list_is_walked_by_index() {
        let line = generate(&vec![Some(1u8), None], "xs").expect("generates").expect("not ignored");
        assert_eq!(
            line.to_string(),
            [
                "assertThat(xs).isNotNull();",
                "    assertThat(xs.size()).isEqualTo(2);",
                "    assertThat(xs.get(0)).isEqualTo(1);",
                "    assertThat(xs.get(1)).isNull();",
            ]
            .join("\n")
        );
    }

    #[test]
    fn print_to_frames_output_with_blank_lines() {
        let mut sink = Vec::new();
        AssertGenerator::default()
            .print_to(&None::<u8>, "missing", &mut sink)
            .expect("writes");
        assert_eq!(String::from_utf8(sink).expect("utf8"), "\n\nassertThat(missing).isNull();\n\n\n");
    }

    #[test]
    fn print_to_writes_nothing_for_ignored_values() {
        let mut sink = Vec::new();
        let line = AssertGenerator::default().print_to(&(), "unit", &mut sink).expect("writes");
        assert!(line.is_none());
        assert!(sink.is_empty());
    }
}
