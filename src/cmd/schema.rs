//! Schema command - print the expected input format

use clap::Args;
use importc::core::{ImportContext, ImportInput, InputField, VehicleSpec};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the input document
    JsonSchema,
    /// Field descriptions of the vehicle and context objects
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Fields => {
                self.print_fields();
                Ok(())
            }
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ImportInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) {
        println!("JSON Input Format");
        println!("=================");
        println!();
        println!("{{ \"vehicle\": {{ ... }}, \"context\": {{ ... }} }}");
        print_section("vehicle", VehicleSpec::input_fields());
        print_section("context", ImportContext::input_fields());
        println!();
        println!("Dates use YYYY-MM-DD. Amounts are in euros.");
    }
}

fn print_section(name: &str, fields: &[InputField]) {
    println!();
    println!("{name}");
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("  {:30} ({:8})  {}", field.name, req, field.description);
    }
}
