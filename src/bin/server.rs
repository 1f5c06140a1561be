use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use heightgen::config::Params;
use heightgen::features::LargeFeature;
use heightgen::render;

#[derive(Deserialize, Default)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    max_height: Option<f32>,
    // Rolling hills
    hill_scale: Option<f32>,
    hill_height: Option<f32>,
    // Large hills
    num_large_hills: Option<usize>,
    large_hill_height: Option<f32>,
    large_hill_min_size: Option<f32>,
    large_hill_max_size: Option<f32>,
    mountain_roughness: Option<f32>,
    flat_area_threshold: Option<f32>,
    // Detail
    detail_amount: Option<f32>,
    detail_scale: Option<f32>,
    /// Pull sliders into their editor ranges instead of rejecting.
    #[serde(default)]
    clamp: bool,
    /// Also return the raw normalized heights.
    #[serde(default)]
    include_heights: bool,
}

impl GenerateRequest {
    fn params(&self) -> Params {
        let d = Params::default();
        let params = Params {
            width: self.width.unwrap_or(1024),
            height: self.height.unwrap_or(1024),
            max_height: self.max_height.unwrap_or(d.max_height),
            seed: self.seed.unwrap_or(d.seed),
            hill_scale: self.hill_scale.unwrap_or(d.hill_scale),
            hill_height: self.hill_height.unwrap_or(d.hill_height),
            num_large_hills: self.num_large_hills.unwrap_or(d.num_large_hills),
            large_hill_height: self.large_hill_height.unwrap_or(d.large_hill_height),
            large_hill_min_size: self.large_hill_min_size.unwrap_or(d.large_hill_min_size),
            large_hill_max_size: self.large_hill_max_size.unwrap_or(d.large_hill_max_size),
            mountain_roughness: self.mountain_roughness.unwrap_or(d.mountain_roughness),
            flat_area_threshold: self.flat_area_threshold.unwrap_or(d.flat_area_threshold),
            detail_amount: self.detail_amount.unwrap_or(d.detail_amount),
            detail_scale: self.detail_scale.unwrap_or(d.detail_scale),
        };
        if self.clamp {
            params.clamp_to_ui_ranges()
        } else {
            params
        }
    }
}

#[derive(Serialize)]
struct GenerateResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    features: Vec<LargeFeature>,
    width: usize,
    height: usize,
    max_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    heights: Option<Vec<f32>>,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn build_response(params: Params, include_heights: bool) -> Result<GenerateResponse, ApiError> {
    let (terrain, timings) = heightgen::generate_timed(&params)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    let (w, h) = (terrain.height.w, terrain.height.h);
    let data_url = encode_png(&render::render_heightmap(&terrain.height), w, h)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let timings = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    Ok(GenerateResponse {
        layers: vec![Layer {
            name: "heightmap".into(),
            data_url,
        }],
        timings,
        features: terrain.layout.features,
        width: w,
        height: h,
        max_height: terrain.max_height,
        heights: include_heights.then_some(terrain.height.data),
    })
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let params = req.params();
    let include_heights = req.include_heights;

    let response = tokio::task::spawn_blocking(move || build_response(params, include_heights))
        .await
        .map_err(|e| {
            error!("generation task failed: {e}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e)
        })??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::fmt().init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("heightgen server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
