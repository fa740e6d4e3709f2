//! Reconciled view state of the admin request dashboard

use super::images::ImageUrlResolver;
use crate::models::{AdoptionRequest, Pet, SuccessEntry};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const PET_PLACEHOLDER: &str = "Loading...";

/// Three slices, each replaced wholesale or shrunk by key. Updates build a
/// new value and never touch the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    requests: Vec<AdoptionRequest>,
    pets: HashMap<String, Pet>,
    success_entries: Vec<SuccessEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingRequestView {
    pub request_id: String,
    pub requester: String,
    pub contact: String,
    pub email: String,
    pub pet_id: String,
    pub pet_name: Option<String>,
    pub image_url: Option<String>,
}

impl PendingRequestView {
    pub fn pet_label(&self) -> &str {
        self.pet_name.as_deref().unwrap_or(PET_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEntryView {
    pub entry_id: String,
    pub requester: String,
    pub contact: String,
    pub email: String,
    pub pet_name: Option<String>,
    pub image_url: Option<String>,
    pub success_date: String,
}

impl SuccessEntryView {
    pub fn pet_label(&self) -> &str {
        self.pet_name.as_deref().unwrap_or(PET_PLACEHOLDER)
    }
}

/// Distinct pet ids referenced by `requests`, in first-seen order.
pub fn distinct_pet_ids(requests: &[AdoptionRequest]) -> Vec<String> {
    let mut seen = HashSet::new();
    requests
        .iter()
        .filter(|request| seen.insert(request.pet_id.as_str()))
        .map(|request| request.pet_id.clone())
        .collect()
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[AdoptionRequest] {
        &self.requests
    }

    pub fn pets(&self) -> &HashMap<String, Pet> {
        &self.pets
    }

    pub fn success_entries(&self) -> &[SuccessEntry] {
        &self.success_entries
    }

    pub fn with_requests(&self, requests: Vec<AdoptionRequest>) -> Self {
        Self {
            requests,
            ..self.clone()
        }
    }

    /// Replaces the pet slice, keyed by pet id.
    pub fn with_pets(&self, pets: Vec<Pet>) -> Self {
        let pets = pets.into_iter().map(|pet| (pet.id.clone(), pet)).collect();
        Self {
            pets,
            ..self.clone()
        }
    }

    pub fn with_success_entries(&self, success_entries: Vec<SuccessEntry>) -> Self {
        Self {
            success_entries,
            ..self.clone()
        }
    }

    pub fn without_request(&self, request_id: &str) -> Self {
        let requests = self
            .requests
            .iter()
            .filter(|request| request.id != request_id)
            .cloned()
            .collect();
        Self {
            requests,
            ..self.clone()
        }
    }

    pub fn without_pet(&self, pet_id: &str) -> Self {
        let mut pets = self.pets.clone();
        pets.remove(pet_id);
        Self {
            pets,
            ..self.clone()
        }
    }

    pub fn pending_views(&self, images: &ImageUrlResolver) -> Vec<PendingRequestView> {
        self.requests
            .iter()
            .map(|request| {
                let pet = self.pets.get(&request.pet_id);
                PendingRequestView {
                    request_id: request.id.clone(),
                    requester: request.name.clone(),
                    contact: request.contact.clone(),
                    email: request.email.clone(),
                    pet_id: request.pet_id.clone(),
                    pet_name: pet.map(|pet| pet.name.clone()),
                    image_url: pet
                        .and_then(|pet| pet.image.as_deref())
                        .and_then(|image| images.resolve(image)),
                }
            })
            .collect()
    }

    pub fn success_views(&self, images: &ImageUrlResolver) -> Vec<SuccessEntryView> {
        self.success_entries
            .iter()
            .map(|entry| SuccessEntryView {
                entry_id: entry.id.clone(),
                requester: entry.request.name.clone(),
                contact: entry.request.contact.clone(),
                email: entry.request.email.clone(),
                pet_name: entry.pet.as_ref().map(|pet| pet.name.clone()),
                image_url: entry
                    .pet
                    .as_ref()
                    .and_then(|pet| pet.image.as_deref())
                    .and_then(|image| images.resolve(image)),
                success_date: entry.success_date.format("%Y-%m-%d").to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn request(id: &str, pet_id: &str) -> AdoptionRequest {
        AdoptionRequest {
            id: id.to_string(),
            name: "Ann".to_string(),
            contact: "555-0101".to_string(),
            email: "a@x.com".to_string(),
            pet_id: pet_id.to_string(),
        }
    }

    fn pet(id: &str, name: &str, image: Option<&str>) -> Pet {
        Pet {
            id: id.to_string(),
            name: name.to_string(),
            image: image.map(str::to_string),
        }
    }

    fn resolver() -> ImageUrlResolver {
        ImageUrlResolver::new("https://pets.example", "/uploads", crate::config::LEGACY_UPLOAD_PREFIX)
    }

    #[test]
    fn test_distinct_pet_ids_has_no_duplicates_or_omissions() {
        let requests = vec![
            request("r1", "p2"),
            request("r2", "p1"),
            request("r3", "p2"),
            request("r4", "p3"),
        ];

        assert_eq!(distinct_pet_ids(&requests), vec!["p2", "p1", "p3"]);
        assert!(distinct_pet_ids(&[]).is_empty());
    }

    #[test]
    fn test_updates_leave_the_original_untouched() {
        let original = DashboardState::new()
            .with_requests(vec![request("r1", "p1"), request("r2", "p2")])
            .with_pets(vec![pet("p1", "Rex", None), pet("p2", "Tom", None)]);

        let updated = original.without_request("r1").without_pet("p1");

        assert_eq!(original.requests().len(), 2);
        assert_eq!(original.pets().len(), 2);
        assert_eq!(updated.requests().len(), 1);
        assert_eq!(updated.requests()[0].id, "r2");
        assert!(!updated.pets().contains_key("p1"));
    }

    #[test]
    fn test_removing_unknown_keys_is_a_no_op() {
        let state = DashboardState::new().with_requests(vec![request("r1", "p1")]);
        assert_eq!(state.without_request("r9").without_pet("p9"), state);
    }

    #[test]
    fn test_pending_view_shows_placeholder_until_pet_arrives() {
        let state = DashboardState::new().with_requests(vec![request("r1", "p1")]);

        let views = state.pending_views(&resolver());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].pet_label(), PET_PLACEHOLDER);
        assert!(views[0].image_url.is_none());
    }

    #[test]
    fn test_pending_view_joins_pet_and_image() {
        let state = DashboardState::new()
            .with_requests(vec![request("r1", "p1")])
            .with_pets(vec![pet("p1", "Rex", Some(r"X:\old\uploads\rex.png"))]);

        let views = state.pending_views(&resolver());
        assert_eq!(views[0].pet_label(), "Rex");
        assert_eq!(
            views[0].image_url.as_deref(),
            Some("https://pets.example/uploads/rex.png")
        );
    }

    #[test]
    fn test_success_view_formats_date() {
        let entry = SuccessEntry {
            id: "s1".to_string(),
            request: request("r1", "p1"),
            pet: Some(pet("p1", "Rex", Some("rex.png"))),
            success_date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
        };
        let state = DashboardState::new().with_success_entries(vec![entry]);

        let views = state.success_views(&resolver());
        assert_eq!(views[0].success_date, "2024-05-01");
        assert_eq!(views[0].pet_label(), "Rex");
        assert_eq!(views[0].requester, "Ann");
    }
}
