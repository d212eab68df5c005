use crate::framework::{Attributes, Resource, ResourceEntity};

/// A one-shot identity check. Parameters are nested (`name`, `address`,
/// `identification`), so they are passed as raw [`Attributes`].
pub struct Verification;

impl ResourceEntity for Verification {
    const NAME: &'static str = "verification";
    const PATH: &'static str = "/verifications";
}

impl Resource<Verification> {
    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    pub fn is_valid(&self) -> bool {
        self.status() == Some("valid")
    }

    /// Per-check outcome breakdown, e.g. `details.ofac`.
    pub fn details(&self) -> Option<&Attributes> {
        self.get("details").and_then(|value| value.as_map())
    }
}
