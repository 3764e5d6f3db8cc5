//! Listing records
//!
//! A [`Record`] is built once per successfully extracted listing through a
//! [`RecordBuilder`] and never changes afterwards. Every field is optional on
//! its own: `None` means the attribute was not found on the page.

/// A latitude/longitude pair; the two values are always present together
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Attributes extracted from one listing's detail panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    name: Option<String>,
    address: Option<String>,
    website: Option<String>,
    phone_number: Option<String>,
    reviews_count: Option<u64>,
    reviews_average: Option<f64>,
    coordinates: Option<Coordinates>,
}

impl Record {
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn reviews_count(&self) -> Option<u64> {
        self.reviews_count
    }

    pub fn reviews_average(&self) -> Option<f64> {
        self.reviews_average
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    /// Names of the fields that were actually found, in declaration order
    pub fn found_fields(&self) -> Vec<&'static str> {
        let mut found = Vec::new();
        if self.name.is_some() {
            found.push("name");
        }
        if self.address.is_some() {
            found.push("address");
        }
        if self.website.is_some() {
            found.push("website");
        }
        if self.phone_number.is_some() {
            found.push("phone_number");
        }
        if self.reviews_count.is_some() {
            found.push("reviews_count");
        }
        if self.reviews_average.is_some() {
            found.push("reviews_average");
        }
        if self.coordinates.is_some() {
            found.push("coordinates");
        }
        found
    }
}

/// Accumulates fields for one listing, then freezes them into a [`Record`]
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    inner: Record,
}

impl RecordBuilder {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.inner.name = Some(value.into());
        self
    }

    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.inner.address = Some(value.into());
        self
    }

    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.inner.website = Some(value.into());
        self
    }

    pub fn phone_number(mut self, value: impl Into<String>) -> Self {
        self.inner.phone_number = Some(value.into());
        self
    }

    pub fn reviews_count(mut self, value: u64) -> Self {
        self.inner.reviews_count = Some(value);
        self
    }

    pub fn reviews_average(mut self, value: f64) -> Self {
        self.inner.reviews_average = Some(value);
        self
    }

    pub fn coordinates(mut self, value: Option<Coordinates>) -> Self {
        self.inner.coordinates = value;
        self
    }

    pub fn build(self) -> Record {
        self.inner
    }
}
