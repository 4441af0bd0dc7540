use crate::core::geo::TileCoord;

/// Descriptor for one tile provider: a URL template plus the metadata the
/// layer control and attribution line need. Immutable once built.
///
/// Recognized template placeholders: `{s}` (subdomain), `{z}`/`{x}`/`{y}`
/// (tile coordinate), `{r}` (retina suffix, always substituted empty) and
/// `{ext}` (format extension).
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub subdomains: Vec<String>,
    pub ext: String,
}

impl TileSource {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
        max_zoom: u8,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
            min_zoom: 0,
            max_zoom,
            subdomains: Vec::new(),
            ext: "png".to_string(),
        }
    }

    pub fn with_subdomains(mut self, subdomains: &[&str]) -> Self {
        self.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = ext.into();
        self
    }

    /// Builds the request URL for `coord` by template substitution. The
    /// subdomain rotates deterministically with the tile coordinate so
    /// neighbouring tiles spread across mirrors.
    pub fn url(&self, coord: TileCoord) -> String {
        let mut url = self.url_template.clone();

        if url.contains("{s}") {
            let sub = if self.subdomains.is_empty() {
                ""
            } else {
                let idx = ((coord.x + coord.y) % self.subdomains.len() as u32) as usize;
                &self.subdomains[idx]
            };
            url = url.replace("{s}", sub);
        }

        url.replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "")
            .replace("{ext}", &self.ext)
    }

    /// The fixed basemap registry, first entry is the default. Attributions
    /// are rendered as plain text.
    pub fn basemaps() -> Vec<TileSource> {
        vec![
            TileSource::new(
                "OpenStreetMap",
                "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                "© OpenStreetMap contributors",
                19,
            )
            .with_subdomains(&["a", "b", "c"]),
            TileSource::new(
                "Grayscale",
                "https://stamen-tiles-{s}.a.ssl.fastly.net/toner/{z}/{x}/{y}{r}.{ext}",
                "Map tiles by Stamen Design, CC BY 3.0 — Map data © OpenStreetMap contributors",
                20,
            )
            .with_subdomains(&["a", "b", "c", "d"]),
            TileSource::new(
                "Open Topo Map",
                "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
                "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)",
                17,
            )
            .with_subdomains(&["a", "b", "c"]),
            TileSource::new(
                "USGS US Imagery",
                "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryTopo/MapServer/tile/{z}/{y}/{x}",
                "Tiles courtesy of the U.S. Geological Survey",
                20,
            ),
        ]
    }
}
