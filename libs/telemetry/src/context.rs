/// Label set attached to relay metrics.
#[derive(Debug, Clone, Default)]
pub struct TelemetryLabels {
    pub kind: String,
    pub destination: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl TelemetryLabels {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            destination: None,
            extra: Vec::new(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        let destination = destination.into();
        if !destination.is_empty() {
            self.destination = Some(destination);
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        tags.push(("kind".into(), self.kind.clone()));
        if let Some(destination) = &self.destination {
            tags.push(("destination".into(), destination.clone()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}
