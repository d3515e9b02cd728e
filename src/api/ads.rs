use super::{AdminApi, FileUpload, segment};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::{HttpClient, MultipartForm};
use gemadmin_shared::chrono::NaiveDate;
use gemadmin_shared::{Ad, AdStatus, RecordId};
use serde_json::Value;

/// 广告表单，以 multipart 提交
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdForm {
    pub title: String,
    pub description: Option<String>,
    pub ad_type: Option<String>,
    pub target_audience: Option<String>,
    pub status: AdStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// 更新时为空表示保留原图
    pub image: Option<FileUpload>,
}

fn status_str(status: AdStatus) -> &'static str {
    match status {
        AdStatus::Active => "active",
        AdStatus::Inactive => "inactive",
        AdStatus::Draft | AdStatus::Unknown => "draft",
    }
}

impl AdForm {
    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("status", status_str(self.status));

        let optional = [
            ("description", self.description.clone()),
            ("ad_type", self.ad_type.clone()),
            ("target_audience", self.target_audience.clone()),
            ("start_date", self.start_date.map(|d| d.format("%Y-%m-%d").to_string())),
            ("end_date", self.end_date.map(|d| d.format("%Y-%m-%d").to_string())),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }

        match &self.image {
            Some(image) => image.attach(form, "image"),
            None => form,
        }
    }
}

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_ads(&self) -> Result<Vec<Ad>, ApiError> {
        self.fetch(Call::get("/ads/all")).await
    }

    pub async fn ad(&self, id: &RecordId) -> Result<Ad, ApiError> {
        self.fetch(Call::get(format!("/ads/{}", segment(id)?))).await
    }

    pub async fn active_ads(&self) -> Result<Vec<Ad>, ApiError> {
        self.fetch(Call::get("/ads/active")).await
    }

    pub async fn create_ad(&self, ad: &AdForm) -> Result<Value, ApiError> {
        self.fetch(Call::post("/ads/create").multipart(ad.to_multipart()))
            .await
    }

    pub async fn update_ad(&self, id: &RecordId, ad: &AdForm) -> Result<Value, ApiError> {
        self.fetch(Call::patch(format!("/ads/{}", segment(id)?)).multipart(ad.to_multipart()))
            .await
    }

    pub async fn delete_ad(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::delete(format!("/ads/{}", segment(id)?))).await
    }
}
