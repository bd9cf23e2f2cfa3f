//! File-based request/response exchange with the native solver.
//!
//! The native library picks up its warm-start routes from a text file and
//! leaves the improved routes in another, both keyed by a per-call identity
//! so that concurrently running jobs never touch each other's artifacts.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use rand::Rng;

/// One request/response exchange with the solver, alive for a single call.
///
/// The request file is removed when the exchange is dropped, on every exit
/// path. The response file is removed only after a successful decode; a
/// failed call may leave none behind.
pub struct Exchange {
    call_id: i32,
    request: PathBuf,
    response: PathBuf,
}

impl Exchange {
    /// Generate a fresh call identity and derive the artifact paths.
    ///
    /// The identity combines a nanosecond clock reading with a random
    /// perturbation, reduced into the positive `i32` range, so that two jobs
    /// started in the same instant still get distinct artifacts.
    pub fn create() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or(0);
        let perturbation = rand::thread_rng().gen_range(0..10_000u128);
        let call_id = ((nanos * 10_000 + perturbation) % i32::MAX as u128) as i32;

        let tmp = std::env::temp_dir();
        Exchange {
            call_id,
            request: tmp.join(format!("route-{}", call_id)),
            response: tmp.join(format!("swapstar-result-{}", call_id)),
        }
    }

    /// The identity forwarded to the native call.
    pub fn call_id(&self) -> i32 {
        self.call_id
    }

    /// Path of the warm-start route file the solver reads.
    pub fn request_path(&self) -> &Path {
        &self.request
    }

    /// Path of the result file the solver writes.
    pub fn response_path(&self) -> &Path {
        &self.response
    }

    /// Write the initial routes as the solver's warm-start input.
    pub fn write_request(&self, routes: &[Vec<i64>]) -> io::Result<()> {
        debug!(
            "writing {} routes to {}",
            routes.len(),
            self.request.display()
        );
        write_routes(routes, &self.request)
    }

    /// Read back the improved routes and remove the response artifact.
    pub fn read_response(&self) -> io::Result<Vec<Vec<i64>>> {
        let routes = read_routes(&self.response)?;
        debug!(
            "read {} routes from {}",
            routes.len(),
            self.response.display()
        );
        fs::remove_file(&self.response)?;
        Ok(routes)
    }
}

impl Drop for Exchange {
    fn drop(&mut self) {
        if self.request.exists() {
            if let Err(err) = fs::remove_file(&self.request) {
                warn!("could not remove {}: {}", self.request.display(), err);
            }
        }
    }
}

/// Serialize routes one per line: `Route #<k>: ` followed by the
/// space-joined node indices, depot markers omitted, `<k>` 1-based.
pub fn write_routes(routes: &[Vec<i64>], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    for (k, route) in routes.iter().enumerate() {
        let body = route
            .iter()
            .filter(|&&node| node > 0)
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(file, "Route #{}: {}", k + 1, body)?;
    }
    Ok(())
}

/// Parse route lines back into depot-delimited subroutes.
///
/// Lines are consumed while they start with `Route`; the scan stops quietly
/// at the first line that does not, so a trailing cost summary or truncated
/// output ends the result instead of failing it.
pub fn read_routes(path: &Path) -> io::Result<Vec<Vec<i64>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut routes = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.starts_with("Route") {
            break;
        }

        let body = line.split(':').nth(1).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("route line '{}' has no ':' separator", line),
            )
        })?;
        let mut route = vec![0i64];
        for token in body.split_whitespace() {
            let node = token.parse::<i64>().map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("bad route token '{}': {}", token, err),
                )
            })?;
            route.push(node);
        }
        route.push(0);
        routes.push(route);
    }

    Ok(routes)
}
