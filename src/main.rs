/// Render a detection reply the way the results page would show it.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::io::Read;
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;
    use firewatch::model::DetectionResponse;
    use firewatch::render;
    use firewatch::view::Node;

    /// Print the results markup for a detection service reply.
    #[derive(Parser)]
    #[command(name = "firewatch-render", version)]
    struct Args {
        /// JSON reply to render; reads stdin when omitted
        file: Option<PathBuf>,
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let json = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let response = DetectionResponse::from_json(&json)
        .context("parsing detection reply")?
        .into_result()
        .context("service reported failure")?;
    log::debug!("Reply has {} detections", response.detections.len());

    let node: Node = render::render_results(&response).into();
    println!("{}", node.to_html());
    Ok(())
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
