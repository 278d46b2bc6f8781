//! Entry point for the VAULT showcase.
//! Logging + hand-parsed CLI flags, then API + window wiring.

use anyhow::Result;

use asset::{Environment, ModelFormat};
use corelib::content::ViewMode;
use platform::ShowcaseConfig;

const DEFAULT_MODEL: &str = "swirl.glb";
const DEFAULT_API_PORT: u16 = 8787;

fn flag_value(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args().find_map(|arg| arg.strip_prefix(&prefix).map(str::to_string))
}

fn parse_backend_arg() -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    if let Some(val) = flag_value("gpu-backend") {
        backends = match val.to_ascii_lowercase().as_str() {
            "auto" => wgpu::Backends::all(),
            "vulkan" | "vk" => wgpu::Backends::VULKAN,
            "dx12" | "d3d12" => wgpu::Backends::DX12,
            "metal" | "mtl" => wgpu::Backends::METAL,
            "gl" | "opengl" | "gles" => wgpu::Backends::GL,
            other => {
                eprintln!("[warn] Unknown backend '{}', falling back to auto.", other);
                wgpu::Backends::all()
            }
        };
    }
    backends
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    if let Some(v) = flag_value("size") {
        if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
            if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                w = Some(pw);
                h = Some(ph);
            }
        }
    }
    if let Some(v) = flag_value("width") {
        if let Ok(pw) = v.parse::<u32>() {
            w = Some(pw);
        }
    }
    if let Some(v) = flag_value("height") {
        if let Ok(ph) = v.parse::<u32>() {
            h = Some(ph);
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

fn parse_env_arg() -> Environment {
    if let Some(val) = flag_value("env") {
        match Environment::from_flag(&val.to_ascii_lowercase()) {
            Some(environment) => return environment,
            None => eprintln!("[warn] Unknown environment '{}', falling back to dev.", val),
        }
    }
    Environment::Development
}

fn parse_model_arg() -> (String, ModelFormat) {
    let file = flag_value("model").unwrap_or_else(|| DEFAULT_MODEL.to_string());
    match ModelFormat::for_file(&file) {
        Some(format) => (file, format),
        None => {
            eprintln!(
                "[warn] Unrecognized model extension on '{}', falling back to {}.",
                file, DEFAULT_MODEL
            );
            (DEFAULT_MODEL.to_string(), ModelFormat::GlbBinary)
        }
    }
}

fn parse_api_port_arg() -> Option<u16> {
    if std::env::args().any(|arg| arg == "--no-api") {
        return None;
    }
    let port = flag_value("api-port")
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_API_PORT);
    Some(port)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let backends = parse_backend_arg();
    let (width, height) = parse_size_args();
    let environment = parse_env_arg();
    let (model_file, format) = parse_model_arg();
    let view_mode = ViewMode::from_query(flag_value("view").as_deref());
    let api_port = parse_api_port_arg();

    log::info!(
        "Starting VAULT showcase. Backend: {:?}, env: {:?}, model: {} ({}), view: {:?}, window: {}x{}",
        backends,
        environment,
        model_file,
        format.label(),
        view_mode,
        width,
        height
    );

    let api = api_port.map(waitlist::server::spawn);
    if api.is_none() {
        log::info!("API server disabled (--no-api)");
    }

    let config = ShowcaseConfig {
        backends,
        width,
        height,
        environment,
        base_path: flag_value("base").unwrap_or_default(),
        model_file,
        format,
        view_mode,
    };
    platform::run(config)?;

    if let Some(api) = api {
        api.shutdown();
    }
    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
