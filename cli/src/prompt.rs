#![deny(missing_docs)]

//! # Interactive Prompts
//!
//! Collects the operator's answers in a fixed order. Generic over the reader
//! and writer so the whole conversation can be scripted in tests.

use crate::error::{CliError, CliResult};
use scaffold_core::{ArchitectureStyle, EntityBuilder, EntityDescriptor, TypeMapper, FIELD_SENTINEL};
use std::io::{BufRead, Write};

/// Question/answer session over a line-oriented stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `question` and returns the trimmed answer.
    ///
    /// A closed input stream aborts the run.
    pub fn ask(&mut self, question: &str) -> CliResult<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CliError::Aborted(question.to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// Asks for the module name.
    pub fn module_name(&mut self) -> CliResult<String> {
        self.ask("Module name")
    }

    /// Shows the style menu and parses the selection.
    pub fn architecture(&mut self) -> CliResult<ArchitectureStyle> {
        writeln!(self.output, "Architecture:")?;
        for style in ArchitectureStyle::ALL {
            writeln!(self.output, "  {}) {}", style.choice(), style.description())?;
        }
        let answer = self.ask("Select architecture [1-2]")?;
        let style = ArchitectureStyle::from_choice(&answer)?;
        log::debug!("Selected {} architecture", style);
        Ok(style)
    }

    /// Asks for the entity name and starts its field list.
    pub fn entity<M: TypeMapper>(&mut self, mapper: M) -> CliResult<EntityBuilder<M>> {
        let answer = self.ask("Entity name")?;
        Ok(EntityBuilder::new(&answer, mapper)?)
    }

    /// Reads `name:TYPE` lines until the sentinel.
    ///
    /// A rejected line is reported and asked again; it never ends the loop.
    pub fn fields<M: TypeMapper>(
        &mut self,
        mut builder: EntityBuilder<M>,
    ) -> CliResult<EntityDescriptor> {
        writeln!(
            self.output,
            "Enter fields as name:TYPE (e.g. price:DECIMAL(10,2)), '{}' to finish",
            FIELD_SENTINEL
        )?;

        loop {
            let answer = self.ask(&format!("Field #{}", builder.len() + 1))?;
            if answer == FIELD_SENTINEL {
                break;
            }
            if answer.is_empty() {
                continue;
            }

            match builder.add_field(&answer) {
                Ok(field) => writeln!(
                    self.output,
                    "✅ {} / {} / {} {} -> {}",
                    field.names.snake,
                    field.names.camel,
                    field.names.pascal,
                    field.storage_type,
                    field.host_type
                )?,
                Err(e) => writeln!(self.output, "❌ {}", e)?,
            }
        }

        Ok(builder.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::{AppError, MySqlTypeMapper};
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn test_architecture_menu() {
        let mut p = prompter("2\n");
        assert_eq!(p.architecture().unwrap(), ArchitectureStyle::Layered);
        let text = transcript(p);
        assert!(text.contains("  1) Flat"));
        assert!(text.contains("  2) Layered"));
    }

    #[test]
    fn test_invalid_architecture_aborts() {
        let mut p = prompter("3\n1\n");
        let err = p.architecture().unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::Input(_))));
    }

    #[test]
    fn test_fields_retry_after_errors() {
        let mut p = prompter("Product\nname\nname:VARCHAR(255)\nname:TEXT\n\nprice:decimal(10,2)\ndone\n");
        let builder = p.entity(MySqlTypeMapper).unwrap();
        let entity = p.fields(builder).unwrap();

        let names: Vec<&str> = entity.fields().iter().map(|f| f.column_name()).collect();
        assert_eq!(names, vec!["name", "price"]);
        assert_eq!(entity.fields()[1].storage_type, "DECIMAL(10,2)");

        let text = transcript(p);
        assert_eq!(text.matches("❌").count(), 2);
        assert!(text.contains("✅ price / price / Price DECIMAL(10,2) -> float64"));
        assert!(text.contains("Field #3: "));
    }

    #[test]
    fn test_field_confirmation_shows_every_name_form() {
        let mut p = prompter("OrderLine\nunitPrice:DECIMAL(10,2)\nshipped_at:datetime\ndone\n");
        let builder = p.entity(MySqlTypeMapper).unwrap();
        p.fields(builder).unwrap();

        let text = transcript(p);
        assert!(text.contains("✅ unit_price / unitPrice / UnitPrice DECIMAL(10,2) -> float64\n"));
        assert!(text.contains("✅ shipped_at / shippedAt / ShippedAt DATETIME -> time.Time\n"));
    }

    #[test]
    fn test_zero_fields_aborts() {
        let mut p = prompter("Product\ndone\n");
        let builder = p.entity(MySqlTypeMapper).unwrap();
        let err = p.fields(builder).unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::Precondition(_))));
    }

    #[test]
    fn test_closed_input_aborts() {
        let mut p = prompter("Product\nname:TEXT\n");
        let builder = p.entity(MySqlTypeMapper).unwrap();
        let err = p.fields(builder).unwrap_err();
        assert!(matches!(err, CliError::Aborted(_)));
    }

    #[test]
    fn test_empty_entity_name_is_rejected() {
        let mut p = prompter("   \n");
        assert!(p.entity(MySqlTypeMapper).is_err());
    }
}
