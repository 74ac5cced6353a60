//! `graph`: render a PROV-JSON document to an image file.

use std::path::Path;

use anyhow::anyhow;
use seedcat_prov::{GraphvizRenderer, ImageFormat, ProvError, RenderOptions, render_to_file};

use crate::cli::GraphArgs;
use crate::client::{CliError, CliResult};

fn prov_error(err: &ProvError) -> CliError {
    if err.is_client_error() {
        CliError::validation(err.detail())
    } else {
        CliError::failure(anyhow!(err.detail()))
    }
}

/// Render `args.document` at print resolution into `<output_dir>/prov.<format>`.
pub(crate) async fn handle_graph(dot: &Path, args: GraphArgs) -> CliResult<()> {
    let format = args
        .format
        .parse::<ImageFormat>()
        .map_err(|err| prov_error(&err))?;
    let renderer = GraphvizRenderer::new(dot);

    let written = render_to_file(
        &renderer,
        &args.document,
        &args.output_dir,
        format,
        RenderOptions::print(),
    )
    .await
    .map_err(|err| prov_error(&err))?;

    println!("wrote {}", written.display());
    Ok(())
}
