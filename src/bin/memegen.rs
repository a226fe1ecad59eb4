use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use memegen::{
    CompositorOpts, CpuCompositor, DOWNLOAD_FILE_NAME, DisplayFace, GeminiClient, GeminiOpts,
    ImageLoader, ImageReference, MemeConfig, MemeError, MemeSession, Outcome, Rgba8,
};

/// Environment variable naming the caption font file.
const FONT_ENV: &str = "MEMEGEN_FONT";

#[derive(Parser, Debug)]
#[command(name = "memegen", version, about = "Compose captioned images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption an existing image and write it out.
    Compose(ComposeArgs),
    /// Generate an image from a prompt, then caption it.
    Generate(GenerateArgs),
    /// Print caption suggestions as JSON.
    Suggest(SuggestArgs),
}

#[derive(Args, Debug)]
struct CaptionArgs {
    /// Base config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Top caption.
    #[arg(long)]
    top: Option<String>,

    /// Bottom caption.
    #[arg(long)]
    bottom: Option<String>,

    /// Font size in pixels (20..=100).
    #[arg(long)]
    font_size: Option<f32>,

    /// Fill color, e.g. `#ffffff`.
    #[arg(long)]
    text_color: Option<Rgba8>,

    /// Outline color, e.g. `#000000`.
    #[arg(long)]
    stroke_color: Option<Rgba8>,

    /// Bold caption font (TTF/OTF). Defaults to `$MEMEGEN_FONT`.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output path; `.png`, `.jpg` or `.jpeg`.
    #[arg(long, default_value = DOWNLOAD_FILE_NAME)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Image URL, `data:` URL or file path.
    #[arg(long)]
    image: ImageReference,

    #[command(flatten)]
    caption: CaptionArgs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Image generation prompt.
    #[arg(long)]
    prompt: String,

    /// Fill the captions with the first AI suggestion for the generated image.
    #[arg(long, default_value_t = false)]
    suggest: bool,

    #[command(flatten)]
    caption: CaptionArgs,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    /// Topic to joke about; wins over `--image`.
    #[arg(long, default_value = "")]
    topic: String,

    /// Image to describe when no topic is given.
    #[arg(long)]
    image: Option<ImageReference>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args).await,
        Command::Generate(args) => cmd_generate(args).await,
        Command::Suggest(args) => cmd_suggest(args).await,
    }
}

async fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let session = MemeSession::with_config(args.caption.build_config()?)?;
    session
        .load_image(&ImageLoader::new(), args.image)
        .await
        .context("load source image")?;
    render_and_save(&session, &args.caption)
}

async fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let backend = GeminiClient::new(GeminiOpts::from_env()?);
    let loader = ImageLoader::new();
    let session = MemeSession::with_config(args.caption.build_config()?)?;

    session
        .generate_image(&backend, &loader, &args.prompt)
        .await
        .context("generate image")?;
    if args.suggest {
        match session.suggest_captions(&backend, &loader, "").await {
            Outcome::Applied => {
                let config = session.config();
                eprintln!("captions: {:?} / {:?}", config.top_text, config.bottom_text);
            }
            _ => eprintln!("no caption suggestions; keeping captions as given"),
        }
    }
    render_and_save(&session, &args.caption)
}

async fn cmd_suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let Some(request) = memegen::captions::suggest::select_request(&args.topic, args.image.as_ref())
    else {
        anyhow::bail!("nothing to suggest for: pass --topic or --image");
    };
    let backend = GeminiClient::new(GeminiOpts::from_env()?);
    let suggestions =
        memegen::session::meme_session::request_suggestions(&backend, &ImageLoader::new(), request)
            .await;
    if suggestions.is_empty() {
        return Err(MemeError::empty_result("backend returned no caption suggestions").into());
    }
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}

impl CaptionArgs {
    fn build_config(&self) -> anyhow::Result<MemeConfig> {
        let mut config = match &self.config {
            Some(path) => MemeConfig::from_path(path)?,
            None => MemeConfig::default(),
        };
        if let Some(top) = &self.top {
            config = config.with_top_text(top.clone());
        }
        if let Some(bottom) = &self.bottom {
            config = config.with_bottom_text(bottom.clone());
        }
        if let Some(size) = self.font_size {
            config = config.with_font_size(size);
        }
        if let Some(c) = self.text_color {
            config = config.with_text_color(c);
        }
        if let Some(c) = self.stroke_color {
            config = config.with_stroke_color(c);
        }
        config.validate()?;
        Ok(config)
    }

    fn compositor(&self, config: &MemeConfig) -> anyhow::Result<CpuCompositor> {
        let font = self
            .font
            .clone()
            .or_else(|| std::env::var_os(FONT_ENV).map(PathBuf::from));
        match font {
            Some(path) => {
                let face = DisplayFace::from_path(&path)
                    .with_context(|| format!("load caption font '{}'", path.display()))?;
                Ok(CpuCompositor::with_face(face, CompositorOpts::default())?)
            }
            None if config.has_no_captions() => Ok(CpuCompositor::new(CompositorOpts::default())),
            None => anyhow::bail!("captions need a font: pass --font or set {FONT_ENV}"),
        }
    }
}

fn render_and_save(session: &MemeSession, caption: &CaptionArgs) -> anyhow::Result<()> {
    let mut compositor = caption.compositor(&session.config())?;
    let canvas = session
        .render(&mut compositor)?
        .context("no source image loaded")?;
    memegen::encode::png::save(&canvas, &caption.out)?;
    eprintln!(
        "wrote {} ({}x{})",
        caption.out.display(),
        canvas.width,
        canvas.height
    );
    Ok(())
}
