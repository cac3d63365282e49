//! Minimal CLI: JSON in (file | inline text | stdin), declarations out.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use indexmap::IndexMap;

use crate::emit::ExportPolicy;
use crate::ident::CaseType;
use crate::infer::{self, ConvertOptions};
use crate::parse::RawInput;

/// infer TypeScript interface declarations from JSON input
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// read JSON from a file (takes priority over stdin)
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// read JSON from an inline argument (takes priority over stdin)
    #[arg(long)]
    text: Option<String>,

    /// top-level declaration name
    #[arg(long, default_value = "RootObject")]
    root: String,

    /// export marker policy: a(ll) | r(oot) | n(one)
    #[arg(long, default_value = "r", value_parser = parse_export)]
    export: ExportPolicy,

    /// emit one flattened declaration instead of cross-referenced interfaces
    #[arg(long, default_value_t = false)]
    flat: bool,

    /// output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// largest array length still considered for tuple synthesis
    #[arg(long, default_value_t = 10)]
    max_tuple_size: usize,

    /// smallest array length considered for tuple synthesis
    #[arg(long, default_value_t = 2)]
    min_tuple_size: usize,

    /// map null/undefined to their literal types instead of a catch-all
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// JSON object mapping property names / literal values / runtime type
    /// names to replacement type names
    #[arg(long)]
    type_map: Option<String>,

    /// property-name casing policy
    #[arg(long, value_enum, default_value_t = CaseType::Original)]
    property_case: CaseType,

    /// mark every property readonly
    #[arg(long, default_value_t = false)]
    readonly_properties: bool,

    /// mark every property optional
    #[arg(long, default_value_t = false)]
    optional_properties: bool,
}

fn parse_export(raw: &str) -> Result<ExportPolicy, String> {
    match raw {
        "a" | "all" => Ok(ExportPolicy::All),
        "r" | "root" => Ok(ExportPolicy::Root),
        "n" | "none" => Ok(ExportPolicy::None),
        other => Err(format!("expected a|r|n, got {other:?}")),
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let source = self.read_source()?;
        let options = self.options()?;
        let rendered = if self.flat {
            infer::convert_flat(source, &self.root, self.export, &options)?
        } else {
            infer::convert(source, &self.root, self.export, &options)?
        };
        self.write_output(&rendered)
    }

    fn read_source(&self) -> anyhow::Result<RawInput> {
        if let Some(path) = &self.file {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return Ok(RawInput::Text(src));
        }
        if let Some(text) = &self.text {
            return Ok(RawInput::Text(text.clone()));
        }
        let mut src = String::new();
        std::io::stdin()
            .read_to_string(&mut src)
            .context("failed to read standard input")?;
        Ok(RawInput::Text(src))
    }

    fn options(&self) -> anyhow::Result<ConvertOptions> {
        let type_map: IndexMap<String, String> = match &self.type_map {
            Some(src) => serde_json::from_str(src)
                .context("--type-map must be a JSON object of strings")?,
            None => IndexMap::new(),
        };
        Ok(ConvertOptions {
            array_max_tuple_size: self.max_tuple_size,
            array_min_tuple_size: self.min_tuple_size,
            strict: self.strict,
            type_map,
            property_case: self.property_case,
            readonly_properties: self.readonly_properties,
            optional_properties: self.optional_properties,
        })
    }

    fn write_output(&self, rendered: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create {}", parent.display())
                        })?;
                    }
                }
                std::fs::write(path, format!("{rendered}\n"))
                    .with_context(|| format!("failed to write {}", path.display()))
            }
            None => {
                println!("{rendered}");
                Ok(())
            }
        }
    }
}
