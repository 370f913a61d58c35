/// The five sensor type categories retained by the cleaner, with their
/// source-language labels, English display names and chemical symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    NitrogenDioxide,
    SulphurDioxide,
    Ozone,
    Pm10,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::NitrogenDioxide,
        Pollutant::SulphurDioxide,
        Pollutant::Ozone,
        Pollutant::Pm10,
        Pollutant::Pm25,
    ];

    /// Resolve a source-language sensor type label (exact match)
    pub fn from_source_label(label: &str) -> Option<Self> {
        match label {
            "Biossido di Azoto" => Some(Pollutant::NitrogenDioxide),
            "Biossido di Zolfo" => Some(Pollutant::SulphurDioxide),
            "Ozono" => Some(Pollutant::Ozone),
            "PM10 (SM2005)" => Some(Pollutant::Pm10),
            "Particelle sospese PM2.5" => Some(Pollutant::Pm25),
            _ => None,
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            Pollutant::NitrogenDioxide => "Biossido di Azoto",
            Pollutant::SulphurDioxide => "Biossido di Zolfo",
            Pollutant::Ozone => "Ozono",
            Pollutant::Pm10 => "PM10 (SM2005)",
            Pollutant::Pm25 => "Particelle sospese PM2.5",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::NitrogenDioxide => "Nitrogen Dioxide",
            Pollutant::SulphurDioxide => "Sulphur Dioxide",
            Pollutant::Ozone => "Ozone",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Pollutant::NitrogenDioxide => "NO2",
            Pollutant::SulphurDioxide => "SO2",
            Pollutant::Ozone => "O3",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
        }
    }
}
