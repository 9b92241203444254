use ureq::{Agent, AgentBuilder, Error, RedirectAuthHeaders};

use super::{FileDownloader, Response};

use std::io::Read;

/// Blocking fetcher over a single `ureq` agent, so page requests and image
/// downloads share one connection pool. `Authorization` survives redirects
/// that stay on the same host.
pub struct UReqFetcher {
    agent: Agent,
}

impl FileDownloader for UReqFetcher {
    fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> Response {
        let request = headers
            .iter()
            .fold(self.agent.get(url), |request, (key, value)| {
                request.set(key, value)
            });

        match request.call() {
            Ok(response) if response.status() != 200 => Response::status(response.status()),

            Ok(response) => {
                let mut body = Vec::new();

                if let Err(err) = response.into_reader().read_to_end(&mut body) {
                    return Response::invalid_body(err.to_string());
                }

                Response::ok(body)
            }

            Err(Error::Status(code, _)) => Response::status(code),

            Err(Error::Transport(transport)) => Response::network_error(transport.to_string()),
        }
    }
}

impl UReqFetcher {
    pub fn new() -> Self {
        UReqFetcher {
            agent: AgentBuilder::new()
                .redirect_auth_headers(RedirectAuthHeaders::SameHost)
                .build(),
        }
    }
}

impl Default for UReqFetcher {
    fn default() -> Self {
        Self::new()
    }
}
