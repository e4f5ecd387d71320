use anyhow::{Context, Result};
use cellview::config::LoggingConfig;
use cellview::widget::{AnimationPlayer, Checkbox, Flex, InputField, List, ListItem};
use cellview::{AppConfig, Application, Constraint, Direction, KeyEvent, Primitive};
use clap::Parser;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Parser, Debug)]
#[command(name = "cellview-demo")]
#[command(about = "A small form driven by the cellview event loop")]
struct Args {
    /// Configuration file (created with defaults if missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text-art animation played above the form
    #[arg(long)]
    animation: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();
    config.validate()?;

    init_logging(&config.logging)?;
    tracing::debug!("{}", config.summary());

    let theme = config.theme()?;
    let app = Arc::new(Application::new(config.screen.clone()));

    let form = Arc::new(Flex::new(&theme));
    form.set_direction(Direction::Vertical);
    form.block()
        .set_border(true)
        .set_title(config.screen.title.clone().unwrap_or_else(|| " cellview ".to_string()));

    let name = Arc::new(InputField::new(&theme));
    name.set_label("Name: ")
        .set_placeholder("type here")
        .set_field_width(24);

    let subscribe = Arc::new(Checkbox::new(&theme));
    subscribe.set_label("Subscribe ");

    let actions = Arc::new(List::new(&theme));
    actions.show_secondary_text(true);
    actions.block().set_border(true).set_title(" actions ");
    actions
        .add_item(
            ListItem::new("Suspend")
                .secondary_text("Hand the terminal back for a moment")
                .shortcut('s')
                .on_selected(suspend_briefly(&app)),
        )
        .add_item(
            ListItem::new("Quit")
                .secondary_text("Leave the demo")
                .shortcut('q')
                .on_selected(stop(&app)),
        );

    let name_dyn: Arc<dyn Primitive> = name.clone();
    let subscribe_dyn: Arc<dyn Primitive> = subscribe.clone();
    let actions_dyn: Arc<dyn Primitive> = actions.clone();

    let next = focus_on(&app, &subscribe_dyn);
    name.set_done_func(move |_key: KeyEvent| next());
    let next = focus_on(&app, &actions_dyn);
    subscribe.set_done_func(move |_key: KeyEvent| next());
    actions.set_done_func(focus_on(&app, &name_dyn));

    if let Some(path) = &args.animation {
        let intro = Arc::new(AnimationPlayer::new(&theme));
        intro
            .load(path)
            .with_context(|| format!("Failed to load animation {}", path.display()))?;

        let weak_app = Arc::downgrade(&app);
        intro.set_redraw_func(move || {
            if let Some(app) = weak_app.upgrade() {
                app.draw();
            }
        });
        intro.set_finished_func(focus_on(&app, &name_dyn));
        form.add_item(intro, Constraint::Fixed(8), false);
    }

    form.add_item(name_dyn, Constraint::Fixed(1), false)
        .add_item(subscribe_dyn, Constraint::Fixed(1), false)
        .add_item(actions_dyn, Constraint::Fill(1), false);

    // The form hands focus to its first child: the animation when there is one
    app.set_root(form, true);
    app.run()?;

    tracing::info!(name = %name.text(), subscribed = subscribe.is_checked(), "Demo finished");
    Ok(())
}

/// Callback moving focus to `target`
///
/// Holds both ends weakly so widgets referring to each other do not keep
/// the form alive.
fn focus_on(app: &Arc<Application>, target: &Arc<dyn Primitive>) -> impl Fn() + Send + Sync + 'static {
    let app = Arc::downgrade(app);
    let target = Arc::downgrade(target);
    move || {
        if let (Some(app), Some(target)) = (app.upgrade(), target.upgrade()) {
            app.set_focus(target);
        }
    }
}

fn stop(app: &Arc<Application>) -> impl Fn() + Send + Sync + 'static {
    let app = Arc::downgrade(app);
    move || {
        if let Some(app) = app.upgrade() {
            app.stop();
        }
    }
}

fn suspend_briefly(app: &Arc<Application>) -> impl Fn() + Send + Sync + 'static {
    let app = Arc::downgrade(app);
    move || {
        if let Some(app) = app.upgrade() {
            app.suspend(|| {
                println!("cellview is suspended; press Enter to return");
                let mut line = String::new();
                let _ = std::io::stdin().read_line(&mut line);
            });
        }
    }
}

/// Install the tracing subscriber when a log file is configured
///
/// The terminal belongs to the UI, so without a file nothing is installed.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let default_directive = format!("cellview={0},cellview_demo={0}", config.level);
    let env_override = env::var("RUST_LOG").unwrap_or_default();
    let combined_filter = if env_override.trim().is_empty() {
        default_directive
    } else if env_override.contains("cellview") {
        env_override
    } else {
        format!("{},{}", env_override, default_directive)
    };

    tracing_subscriber::fmt()
        .with_env_filter(combined_filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
