use serde::{Deserialize, Serialize};
use validator::Validate;

/// One physical sensor installation from the local reference file.
///
/// `idsensore` is the join key against the fetched readings and is unique
/// within the file. Validity dates stay in source text form until the
/// cleaner casts them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Station {
    pub idsensore: u32,

    #[validate(length(min = 1))]
    pub nometiposensore: String,

    pub idstazione: u32,

    #[validate(length(min = 1))]
    pub nomestazione: String,

    pub quota: i32,

    pub provincia: String,

    pub comune: String,

    pub storico: String,

    pub datastart: String,

    pub datastop: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Station {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        idsensore: u32,
        nometiposensore: String,
        idstazione: u32,
        nomestazione: String,
        quota: i32,
        provincia: String,
        comune: String,
        storico: String,
        datastart: String,
        datastop: Option<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            idsensore,
            nometiposensore,
            idstazione,
            nomestazione,
            quota,
            provincia,
            comune,
            storico,
            datastart,
            datastop,
            lat,
            lng,
        }
    }

    /// Whether the installation is still active (no validity stop date)
    pub fn is_active(&self) -> bool {
        match &self.datastop {
            None => true,
            Some(stop) => stop.trim().is_empty(),
        }
    }
}
