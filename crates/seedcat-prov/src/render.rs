//! Turning provenance graphs into images.
//!
//! # Design
//! - [`GraphRenderer`] is the seam; [`GraphvizRenderer`] pipes DOT through an external
//!   `dot` process.
//! - The document is parsed and graphed before any renderer runs or any file is touched.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{ProvError, ProvResult};
use crate::format::ImageFormat;
use crate::graph::ProvGraph;
use crate::model::ProvDocument;

/// Default Graphviz executable.
pub const DEFAULT_DOT_PROGRAM: &str = "dot";
/// Resolution used for print-quality renders.
pub const PRINT_DPI: u32 = 300;

/// Renderer tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output resolution; the renderer default applies when unset.
    pub dpi: Option<u32>,
}

impl RenderOptions {
    /// Options for print-quality output at [`PRINT_DPI`].
    #[must_use]
    pub const fn print() -> Self {
        Self {
            dpi: Some(PRINT_DPI),
        }
    }
}

/// Converts DOT text into image bytes.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// Render `dot` as `format`.
    async fn render(
        &self,
        dot: &str,
        format: ImageFormat,
        options: RenderOptions,
    ) -> ProvResult<Vec<u8>>;
}

/// Renderer invoking the Graphviz `dot` executable.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_PROGRAM)
    }
}

impl GraphvizRenderer {
    /// Renderer running `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable this renderer runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn args(format: ImageFormat, options: RenderOptions) -> Vec<String> {
        let mut args = vec![format!("-T{}", format.as_str())];
        if let Some(dpi) = options.dpi {
            args.push(format!("-Gdpi={dpi}"));
        }
        args
    }
}

#[async_trait]
impl GraphRenderer for GraphvizRenderer {
    async fn render(
        &self,
        dot: &str,
        format: ImageFormat,
        options: RenderOptions,
    ) -> ProvResult<Vec<u8>> {
        let spawn_error = |source| ProvError::RendererSpawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(Self::args(format, options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stdin was not captured")))?;
        let feed = async move {
            let result = stdin.write_all(dot.as_bytes()).await;
            drop(stdin);
            result
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(spawn_error)?;

        if !output.status.success() {
            return Err(ProvError::RendererFailed {
                program: self.program.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed.map_err(spawn_error)?;

        debug!(
            program = %self.program.display(),
            format = %format,
            bytes = output.stdout.len(),
            "rendered graph"
        );
        Ok(output.stdout)
    }
}

/// Graph `document` and render it as `format`.
///
/// # Errors
///
/// Propagates renderer failures.
pub async fn render_document(
    renderer: &dyn GraphRenderer,
    document: &ProvDocument,
    format: ImageFormat,
    options: RenderOptions,
) -> ProvResult<Vec<u8>> {
    let graph = ProvGraph::from_document(document);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built provenance graph"
    );
    renderer.render(&graph.to_dot(), format, options).await
}

/// Read the PROV-JSON file at `source` and write its graph to
/// `<output_dir>/prov.<format>`, returning the written path.
///
/// # Errors
///
/// Returns [`ProvError::Io`] when the document cannot be read or the image cannot be
/// written, parse errors for malformed documents, and renderer failures. Nothing is
/// written unless rendering succeeded.
pub async fn render_to_file(
    renderer: &dyn GraphRenderer,
    source: &Path,
    output_dir: &Path,
    format: ImageFormat,
    options: RenderOptions,
) -> ProvResult<PathBuf> {
    let text = tokio::fs::read_to_string(source)
        .await
        .map_err(|err| ProvError::io("read_document", source, err))?;
    let document = ProvDocument::from_json(&text)?;
    let image = render_document(renderer, &document, format, options).await?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|err| ProvError::io("create_dir_all", output_dir, err))?;
    let target = output_dir.join(format.file_name());
    tokio::fs::write(&target, &image)
        .await
        .map_err(|err| ProvError::io("write_image", &target, err))?;

    info!(
        source = %source.display(),
        path = %target.display(),
        format = %format,
        bytes = image.len(),
        "wrote provenance graph"
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use seedcat_test_support::graphviz_available;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoRenderer {
        calls: Mutex<Vec<(ImageFormat, RenderOptions)>>,
    }

    #[async_trait]
    impl GraphRenderer for EchoRenderer {
        async fn render(
            &self,
            dot: &str,
            format: ImageFormat,
            options: RenderOptions,
        ) -> ProvResult<Vec<u8>> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((format, options));
            Ok(dot.as_bytes().to_vec())
        }
    }

    #[test]
    fn graphviz_arguments_carry_format_and_dpi() {
        assert_eq!(
            GraphvizRenderer::args(ImageFormat::Svg, RenderOptions::default()),
            ["-Tsvg"]
        );
        assert_eq!(
            GraphvizRenderer::args(ImageFormat::Png, RenderOptions::print()),
            ["-Tpng", "-Gdpi=300"]
        );
    }

    #[tokio::test]
    async fn render_to_file_writes_named_image() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = temp.path().join("doc.json");
        std::fs::write(&source, r#"{"entity": {"ex:e": {}}}"#)?;
        let renderer = EchoRenderer::default();

        let written = render_to_file(
            &renderer,
            &source,
            &temp.path().join("out"),
            ImageFormat::Svg,
            RenderOptions::print(),
        )
        .await?;

        assert_eq!(written, temp.path().join("out").join("prov.svg"));
        assert!(std::fs::read_to_string(&written)?.contains("ex:e"));
        assert_eq!(
            *renderer.calls.lock().expect("calls lock"),
            [(ImageFormat::Svg, RenderOptions::print())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_documents_write_nothing() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = temp.path().join("doc.json");
        std::fs::write(&source, r#"{"entity": []}"#)?;
        let output_dir = temp.path().join("out");
        let renderer = EchoRenderer::default();

        let err = render_to_file(
            &renderer,
            &source,
            &output_dir,
            ImageFormat::Png,
            RenderOptions::default(),
        )
        .await
        .err();

        assert!(matches!(err, Some(ProvError::Parse { .. })));
        assert!(!output_dir.exists());
        assert!(renderer.calls.lock().expect("calls lock").is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_document_is_an_io_error() {
        let renderer = EchoRenderer::default();
        let err = render_to_file(
            &renderer,
            Path::new("/definitely/missing/doc.json"),
            Path::new("/tmp"),
            ImageFormat::Png,
            RenderOptions::default(),
        )
        .await
        .err();
        assert!(matches!(
            err,
            Some(ProvError::Io {
                operation: "read_document",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let renderer = GraphvizRenderer::new("/definitely/missing/dot");
        let err = renderer
            .render("digraph {}", ImageFormat::Png, RenderOptions::default())
            .await
            .err();
        assert!(matches!(err, Some(ProvError::RendererSpawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_reports_exit_status() {
        let renderer = GraphvizRenderer::new("false");
        let err = renderer
            .render("digraph {}", ImageFormat::Png, RenderOptions::default())
            .await
            .err();
        assert!(matches!(
            err,
            Some(ProvError::RendererFailed {
                status: Some(1),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn graphviz_renders_svg_when_installed() -> Result<()> {
        if !graphviz_available() {
            return Ok(());
        }
        let renderer = std::env::var("SEEDCAT_GRAPHVIZ_DOT")
            .map_or_else(|_| GraphvizRenderer::default(), GraphvizRenderer::new);
        let document = ProvDocument::from_json(r#"{"entity": {"ex:e": {}}}"#)?;
        let svg = render_document(
            &renderer,
            &document,
            ImageFormat::Svg,
            RenderOptions::default(),
        )
        .await?;
        assert!(String::from_utf8(svg)?.contains("<svg"));
        Ok(())
    }
}
