use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use contractify_codegen::Generated;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedOutput {
    out_file: String,
    contracts_dir: String,
    count: usize,
}

impl From<&Generated> for GeneratedOutput {
    fn from(generated: &Generated) -> Self {
        Self {
            out_file: generated.out_file.display().to_string(),
            contracts_dir: generated.contracts_dir.display().to_string(),
            count: generated.count,
        }
    }
}

pub fn print_generated(generated: &Generated, format: OutputFormat) {
    println!("{}", render_generated(generated, format));
}

fn render_generated(generated: &Generated, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => format!(
            "contractify: generated {} ({} contract(s))",
            generated.out_file.display(),
            generated.count
        ),
        OutputFormat::Json => serde_json::to_string(&GeneratedOutput::from(generated))
            .unwrap_or_else(|_| "{}".to_string()),
        OutputFormat::Table => {
            let out = GeneratedOutput::from(generated);
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OUT FILE", "CONTRACTS DIR", "COUNT"])
                .add_row(vec![out.out_file, out.contracts_dir, out.count.to_string()]);
            table.to_string()
        }
    }
}
