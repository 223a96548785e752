//! Text and JSON output for pipeline results.

use edgarlink::PipelineOutput;
use serde_json::{Value, json};
use std::io::{self, Write};

/// Print the filings as a Form / Date / Link table.
pub(crate) fn render_text(output: &PipelineOutput, out: &mut impl Write) -> io::Result<()> {
    let heading = output.company.as_ref().map_or_else(
        || format!("{} (CIK {})", output.ticker, output.identifier),
        |name| format!("{} - {} (CIK {})", output.ticker, name, output.identifier),
    );
    writeln!(out, "{}", heading)?;
    writeln!(out, "─────────────────────────────────────────────────────────────")?;

    if output.is_empty() {
        writeln!(out, "No recent filings found.")?;
        return Ok(());
    }

    writeln!(out, "{:<8} {:<10}  Link", "Form", "Date")?;
    for (filing, link) in output.links() {
        writeln!(
            out,
            "{:<8} {:<10}  {}",
            filing.form,
            filing.filing_date.to_string(),
            link
        )?;
    }
    Ok(())
}

/// Build the JSON document for `--format json`.
pub(crate) fn render_json(output: &PipelineOutput, chart_url: Option<&str>) -> Value {
    let filings: Vec<Value> = output
        .links()
        .map(|(filing, link)| {
            json!({
                "form": filing.form,
                "filing_date": filing.filing_date,
                "accession_number": filing.accession_number,
                "primary_document": filing.primary_document,
                "url": link,
            })
        })
        .collect();

    let mut doc = json!({
        "ticker": output.ticker,
        "cik": output.identifier,
        "company": output.company,
        "filings": filings,
    });
    if let Some(url) = chart_url {
        doc["chart_url"] = json!(url);
    }
    doc
}
