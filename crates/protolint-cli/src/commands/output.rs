//! Shared output formatting for lint responses.

use anyhow::Result;
use protolint_core::Response;
use std::fmt::Write;

use crate::OutputFormat;

/// Print lint responses in the specified format.
pub fn print(responses: &[Response], format: OutputFormat) -> Result<()> {
    print!("{}", render(responses, format)?);
    Ok(())
}

/// Render lint responses in the specified format.
pub fn render(responses: &[Response], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(responses),
        OutputFormat::Json => serde_json::to_string_pretty(responses)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(responses)?,
    })
}

fn render_text(responses: &[Response]) -> String {
    let mut out = String::new();
    let (mut errors, mut warnings, mut failures) = (0, 0, 0);

    for response in responses {
        let (e, w) = response.count_by_category();
        errors += e;
        warnings += w;
        failures += response.errors.len();

        for problem in &response.problems {
            out.push_str(&problem.format());
            out.push('\n');
        }

        for failure in &response.errors {
            let _ = writeln!(out, "\x1b[31mfailed\x1b[0m {}: {failure}\n", response.file_path);
        }
    }

    let summary_color = if errors > 0 || failures > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(
        out,
        "{summary_color}Found {errors} error(s), {warnings} warning(s) in {} file(s)\x1b[0m",
        responses.len()
    );
    if failures > 0 {
        let _ = writeln!(out, "\x1b[31m{failures} rule execution failure(s)\x1b[0m");
    }
    out
}
