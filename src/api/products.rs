use super::{AdminApi, FileUpload, segment, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::{HttpClient, MultipartForm, UploadProgressFn};
use gemadmin_shared::{Product, ProductUpdate, RecordId};
use serde_json::Value;

/// 新建商品表单：主图 `product_image` 加任意张附图 `images`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub product_price: f64,
    pub product_description: String,
    pub product_quantity: u64,
    pub product_category: Option<String>,
    pub product_tag: Option<String>,
    pub discount_percentage: Option<f64>,
    pub discount_type: Option<String>,
    pub product_image: Option<FileUpload>,
    pub images: Vec<FileUpload>,
}

impl NewProduct {
    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("product_name", &self.product_name)
            .text("product_price", self.product_price)
            .text("product_description", &self.product_description)
            .text("product_quantity", self.product_quantity);

        let optional = [
            ("product_category", self.product_category.clone()),
            ("product_tag", self.product_tag.clone()),
            ("discount_percentage", self.discount_percentage.map(|d| d.to_string())),
            ("discount_type", self.discount_type.clone()),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }

        if let Some(image) = &self.product_image {
            form = image.attach(form, "product_image");
        }
        for image in &self.images {
            form = image.attach(form, "images");
        }
        form
    }
}

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch(Call::get("/all/product")).await
    }

    pub async fn product(&self, id: &RecordId) -> Result<Product, ApiError> {
        self.fetch(Call::get(format!("/product/{}", segment(id)?))).await
    }

    /// 上传进度回调可选
    pub async fn create_product(
        &self,
        product: &NewProduct,
        on_upload_progress: Option<UploadProgressFn>,
    ) -> Result<Value, ApiError> {
        let mut call = Call::post("/new/product").multipart(product.to_multipart());
        if let Some(callback) = on_upload_progress {
            call = call.on_upload_progress(callback);
        }
        self.fetch(call).await
    }

    /// 基本信息（名称、价格、描述、库存）以 JSON 更新
    pub async fn update_product(&self, id: &RecordId, update: &ProductUpdate) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::patch(format!("/update/product/{}", segment(id)?)), update)?)
            .await
    }

    pub async fn delete_product(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::delete(format!("/product/{}", segment(id)?))).await
    }
}
