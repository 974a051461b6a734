use std::fmt::{Debug, Display, Formatter};

/// Stands in for the token wherever a request is printed.
pub const REDACTED_TOKEN: &str = "*********";

/// The calls the update endpoint understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Update the A record to the caller's apparent address.
    UpdateIp,
    UpdateIpWithValues { ipv4: String, ipv6: String },
    ClearIp,
    UpdateRecord(String),
    ClearRecord(String),
}

/// A single call against `/update`.
///
/// [`UpdateRequest::path`] is what goes on the wire. The `Display` and `Debug`
/// impls render the same path with the token masked, so the request can be
/// logged as is.
#[derive(Clone, Copy)]
pub struct UpdateRequest<'a> {
    domains: &'a [String],
    token: &'a str,
    operation: &'a Operation,
    verbose: bool,
}

impl<'a> UpdateRequest<'a> {
    pub fn new(
        domains: &'a [String],
        token: &'a str,
        operation: &'a Operation,
        verbose: bool,
    ) -> Self {
        Self {
            domains,
            token,
            operation,
            verbose,
        }
    }

    pub fn path(&self) -> String {
        self.build(self.token)
    }

    // Domains and values are passed through unescaped; the provider only
    // takes bare labels, addresses and challenge tokens.
    fn build(&self, token: &str) -> String {
        let mut path = String::from("/update?domains=");
        path.push_str(&self.domains.join(","));
        path.push_str("&token=");
        path.push_str(token);

        match self.operation {
            Operation::UpdateIp => path.push_str("&ip="),
            Operation::UpdateIpWithValues { ipv4, ipv6 } => {
                path.push_str("&ip=");
                path.push_str(ipv4);
                if !ipv6.is_empty() {
                    path.push_str("&ipv6=");
                    path.push_str(ipv6);
                }
            }
            Operation::ClearIp => path.push_str("&clear=true"),
            Operation::UpdateRecord(record) => {
                path.push_str("&txt=");
                path.push_str(record);
            }
            Operation::ClearRecord(record) => {
                path.push_str("&txt=");
                path.push_str(record);
                path.push_str("&clear=true");
            }
        }

        if self.verbose {
            path.push_str("&verbose=true");
        }
        path
    }
}

impl Display for UpdateRequest<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build(REDACTED_TOKEN))
    }
}

impl Debug for UpdateRequest<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("path", &self.build(REDACTED_TOKEN))
            .finish()
    }
}
