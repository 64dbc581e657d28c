// Client mode: prepare an image and submit it to a running gateway

use crate::analysis::AnalysisResult;
use crate::prepare::{self, ImagePayload};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Read an image file, run the full client preparation pipeline (compress,
/// size guard) and POST it to the gateway. Prints the four fields on
/// success. Regenerating is simply running this again; nothing is retried
/// automatically.
pub async fn run(path: &Path, gateway_url: &str) -> Result<()> {
    let raw = std::fs::read(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    info!("Read {} bytes from {}", raw.len(), path.display());

    let payload = prepare::prepare(&raw)?;
    info!(
        "Prepared {} payload of {} bytes",
        payload.mime_type, payload.size_bytes
    );

    // Guard runs before any network call; an oversized payload never leaves
    // the machine.
    prepare::check_upload_size(&payload)?;

    let result = submit(&payload, gateway_url).await?;

    println!("DETAILED_DESCRIPTION:\n{}\n", result.detailed);
    println!("VIETNAMESE_DESCRIPTION:\n{}\n", result.vietnamese_description);
    println!("AI_OPTIMIZED_PROMPT:\n{}\n", result.optimized);
    println!("KEYWORDS:\n{}", result.keywords);

    Ok(())
}

/// POST the payload to the gateway and decode the four-field response.
async fn submit(payload: &ImagePayload, gateway_url: &str) -> Result<AnalysisResult> {
    let client = reqwest::Client::new();

    let response = client
        .post(gateway_url)
        .json(&serde_json::json!({
            "image": payload.to_base64(),
            "mimeType": payload.mime_type,
        }))
        .send()
        .await
        .with_context(|| format!("cannot reach gateway at {}", gateway_url))?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        bail!("gateway rejected the request: {}", message);
    }

    Ok(response.json::<AnalysisResult>().await?)
}
