//! Turning a buffered request into a response.
//!
//! This is the glue between the request loop and `dht-core`: classify the
//! request line, tokenize and dispatch sensor paths, format the body. It does
//! no I/O so it can be tested without sockets.

use dht_core::format::{write_compact, write_report, write_value};
use dht_core::{dispatch, PathSegments, RequestLine, Route, Sensor};
use tracing::{debug, error, warn};

use crate::response::{Response, Status};

/// Build the response for a complete request.
///
/// With `strict_status` unset every request is answered `200 OK`: a sensor
/// path that fails to dispatch reads as zero and an unknown page is empty.
/// With it set those cases get `400 Bad Request` and `404 Not Found`.
pub fn handle_request<S: Sensor, const N: usize>(
    request: &RequestLine<N>,
    sensors: &[S],
    strict_status: bool,
) -> Response {
    let Some(route) = Route::classify(request.as_bytes()) else {
        debug!(request = request.as_str(), "No route matched");
        return if strict_status {
            Response::new(Status::NotFound, "Not Found")
        } else {
            Response::ok("")
        };
    };

    debug!(?route, "Handling request");

    let mut body = String::new();
    let written = match route {
        Route::Root => write_compact(&mut body, sensors),
        Route::Report => write_report(&mut body, sensors),
        Route::Sensor => {
            let segments: PathSegments = PathSegments::tokenize(request.as_str());
            match dispatch(&segments, sensors) {
                Ok(value) => {
                    if value.is_nan() {
                        warn!(path = ?segments.as_slice(), "Sensor read failed, reporting 0");
                    }
                    write_value(&mut body, value)
                }
                Err(error) => {
                    warn!(path = ?segments.as_slice(), %error, "Dispatch failed");
                    if strict_status {
                        return Response::new(Status::BadRequest, error.to_string());
                    }
                    write_value(&mut body, 0.0)
                }
            }
        }
    };

    // Only a failing Display impl can make writing into a String fail.
    if let Err(error) = written {
        error!(?route, %error, "Failed to format response body");
    }

    Response::ok(body)
}
