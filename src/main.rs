mod app;
mod layout;
mod profile;
mod util;

use clap::Parser;

use crate::profile::StoreConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "SELFMAP_SUPABASE_URL")]
    url: String,
    #[arg(long, env = "SELFMAP_SUPABASE_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, default_value = "selfmapsbench")]
    table: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = StoreConfig {
        url: args.url,
        api_key: args.api_key,
        table: args.table,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "selfmap-viewer",
        options,
        Box::new(move |cc| Ok(Box::new(app::SelfMapApp::new(cc, config.clone())))),
    )
}
