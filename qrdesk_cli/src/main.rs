mod terminal;

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qrdesk_core::headless::{HeadlessDocument, ManualTimer};
use qrdesk_core::ModuleMatrix;
use qrdesk_generate::{
    rasterize, AsciiRenderer, GeneratorConfig, GeneratorController, GeneratorEvent,
    GeneratorTimeout, QrcodeEncoder,
};
use qrdesk_scan::{
    ImageFile, ImageSource, RqrrDecoder, ScanOutcome, ScannerConfig, ScannerController,
    ScannerEvent, ScannerTimeout,
};

use terminal::{trim_newline, StderrAlerts, TerminalClipboard};

#[derive(Parser)]
#[command(name = "qrdesk")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Generate or scan QR codes from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten_help = true)]
    Encode {
        #[arg(help = "Input file or stdin if unspecified")]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file", help = "Paste the text from the clipboard (stdin)")]
        paste: bool,
        #[arg(
            short,
            long,
            help = "Output file or stdout if unspecified",
            long_help = "Output file or stdout if unspecified. The output format is determined based on the extension. \
            Supported extensions are:\n\
            * text: .txt\n\
            * vector: .svg\n\
            * images: .png"
        )]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 1000, help = "Maximum text length, in characters")]
        max_length: usize,
        #[arg(long, default_value_t = 200, help = "Side of the SVG drawing")]
        size: u32,
        #[arg(long, default_value_t = 8, help = "Pixels per module of PNG output")]
        scale: u32,
        #[arg(long, help = "Swap dark and light modules of text output, for dark terminals")]
        invert: bool,
    },
    Decode {
        file: PathBuf,
        #[arg(long, help = "Write the cropped symbol to this PNG file")]
        preview: Option<PathBuf>,
        #[arg(long, help = "Copy the decoded text to the terminal clipboard")]
        copy: bool,
        #[arg(long, default_value_t = 10, help = "Margin around the symbol in the preview, in pixels")]
        padding: u32,
    },
}

enum Output {
    Stdout,
    Text(PathBuf),
    Svg(PathBuf),
    Png(PathBuf),
}

fn determine_output_kind(path: Option<PathBuf>) -> Result<Output> {
    let Some(path) = path else {
        return Ok(Output::Stdout);
    };
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => Ok(Output::Text(path)),
        Some("svg") => Ok(Output::Svg(path)),
        Some("png") => Ok(Output::Png(path)),
        Some(invalid) => Err(anyhow::Error::msg(format!(
            "invalid output extension '{}'",
            invalid
        ))),
        None => Err(anyhow::Error::msg("requested output has no extension")),
    }
}

fn read_text(file: Option<PathBuf>) -> Result<String> {
    let mut bytes = Vec::new();
    match file {
        Some(path) => {
            File::open(&path)
                .with_context(|| format!("cannot open '{}'", path.display()))?
                .read_to_end(&mut bytes)?;
        }
        None => {
            std::io::stdin().read_to_end(&mut bytes)?;
        }
    };
    let text = String::from_utf8(bytes).context("input is not valid UTF-8")?;
    Ok(trim_newline(&text).to_owned())
}

struct Rendering {
    scale: u32,
    invert: bool,
}

impl Rendering {
    fn ascii(&self) -> AsciiRenderer {
        match self.invert {
            true => AsciiRenderer::new().inverted(),
            false => AsciiRenderer::new(),
        }
    }
}

fn write_matrix(
    output: Output,
    matrix: &ModuleMatrix,
    svg: String,
    rendering: &Rendering,
) -> Result<()> {
    const QUIET_ZONE: usize = 4;
    match output {
        Output::Stdout => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            rendering.ascii().render(&mut writer, matrix, QUIET_ZONE)?;
        }
        Output::Text(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            rendering.ascii().render(&mut writer, matrix, QUIET_ZONE)?;
            writer.flush()?;
        }
        Output::Svg(path) => std::fs::write(path, svg)?,
        Output::Png(path) => rasterize(matrix, rendering.scale, QUIET_ZONE as u32).save(path)?,
    }
    Ok(())
}

/// Print a warning left by the generator. An error is handed back instead.
fn report_message(document: &HeadlessDocument, config: &GeneratorConfig) -> Option<String> {
    let message = document.get(&config.message_id)?;
    let text = message.content();
    if text.is_empty() {
        return None;
    }
    if message.classes().iter().any(|class| class == "error") {
        return Some(text);
    }
    eprintln!("warning: {}", text);
    None
}

async fn encode(
    file: Option<PathBuf>,
    paste: bool,
    output: Option<PathBuf>,
    max_length: usize,
    size: u32,
    rendering: Rendering,
) -> Result<()> {
    // Before doing anything, make sure the requested output is valid.
    let output = determine_output_kind(output)?;
    let config = GeneratorConfig::default()
        .with_max_length(max_length)
        .with_canvas_size(size);
    let document = qrdesk_generate::headless::document_for(&config);
    let mut generator = GeneratorController::bind(
        &document,
        config.clone(),
        QrcodeEncoder::new(),
        TerminalClipboard,
        ManualTimer::<GeneratorTimeout>::new(),
    )?;
    if paste {
        generator.handle(GeneratorEvent::PasteClicked).await;
    } else {
        let text = read_text(file)?;
        if let Some(input) = document.get(&config.text_input_id) {
            input.set_content(&text);
        }
        generator.handle(GeneratorEvent::Input).await;
    }
    if let Some(error) = report_message(&document, &config) {
        anyhow::bail!(error);
    }
    generator.handle(GeneratorEvent::GenerateClicked).await;
    if let Some(error) = report_message(&document, &config) {
        anyhow::bail!(error);
    }
    let (Some(matrix), Some(svg)) = (generator.matrix(), generator.symbol()) else {
        anyhow::bail!("no QR code was generated");
    };
    write_matrix(output, matrix, svg.to_string(), &rendering)
}

fn decode(file: &Path, preview: Option<PathBuf>, copy: bool, padding: u32) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("cannot read '{}'", file.display()))?;
    let mime = mime_guess::from_path(file).first_or_octet_stream();
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let image = ImageFile::new(name, mime.essence_str(), bytes);

    let config = ScannerConfig::default().with_crop_padding(padding);
    let document = qrdesk_scan::headless::document_for(&config);
    let mut scanner = ScannerController::bind(
        &document,
        config.clone(),
        RqrrDecoder::new(),
        TerminalClipboard,
        StderrAlerts,
        ManualTimer::<ScannerTimeout>::new(),
    )?;
    match scanner.accept_image(ImageSource::Picker(Some(image))) {
        ScanOutcome::Decoded(decoded) => println!("{}", decoded.text),
        ScanOutcome::NotFound => anyhow::bail!(qrdesk_scan::NO_QR_CODE),
        ScanOutcome::Failed(message) => anyhow::bail!(message),
        ScanOutcome::Rejected => anyhow::bail!("'{}' is not an image", file.display()),
        ScanOutcome::Ignored => anyhow::bail!("nothing to scan"),
    }
    if let Some(path) = preview {
        let image = document
            .get(&config.preview_id)
            .and_then(|element| element.image())
            .context("the located symbol could not be previewed")?;
        std::fs::write(&path, &image.png)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), image.width, image.height, "wrote preview");
    }
    if copy {
        scanner.handle(ScannerEvent::CopyClicked);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            file,
            paste,
            output,
            max_length,
            size,
            scale,
            invert,
        } => {
            let rendering = Rendering { scale, invert };
            encode(file, paste, output, max_length, size, rendering).await
        }
        Command::Decode {
            file,
            preview,
            copy,
            padding,
        } => decode(&file, preview, copy, padding),
    }
}
