//! WebAssembly bindings.
//!
//! Exposes a single `solveTsp` entry point taking a plain JS object:
//!
//! ```text
//! { matrix: number[][], config?: AnnealConfig, neighborhood?: "swap" | "reversal" | "insertion", starts?: number }
//! ```

use crate::anneal::{AnnealConfig, MultiStart, Neighborhood};
use crate::matrix::DistanceMatrix;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct SolveRequest {
    matrix: Vec<Vec<f64>>,
    #[serde(default)]
    config: AnnealConfig,
    #[serde(default)]
    neighborhood: Neighborhood,
    #[serde(default)]
    starts: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveResponse {
    tour: Vec<usize>,
    cost: f64,
    iterations: usize,
    accepted_moves: usize,
}

/// Solves a TSP instance and returns `{ tour, cost, iterations, acceptedMoves }`.
#[wasm_bindgen(js_name = solveTsp)]
pub fn solve_tsp(request: JsValue) -> Result<JsValue, JsError> {
    let request: SolveRequest = serde_wasm_bindgen::from_value(request)?;
    let matrix = DistanceMatrix::from_rows(&request.matrix)?;

    // std::time::Instant is unavailable on wasm32.
    let config = request.config.with_time_limit_ms(0);

    let result = MultiStart::run(&matrix, &config, &request.neighborhood, request.starts)?.best;
    let response = SolveResponse {
        tour: result.best_tour.into_inner(),
        cost: result.best_cost,
        iterations: result.iterations,
        accepted_moves: result.accepted_moves,
    };
    Ok(serde_wasm_bindgen::to_value(&response)?)
}
