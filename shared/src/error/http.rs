//! 错误码 → HTTP 状态码

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,

            NotFound | ProductNotFound | VariantNotFound | AttributeNotFound | UnitNotFound => {
                StatusCode::NOT_FOUND
            }

            AlreadyExists | VariantBarcodeExists | AttributeNameExists | AttributeValueExists
            | UnitNameExists => StatusCode::CONFLICT,

            NotAuthenticated => StatusCode::UNAUTHORIZED,
            PermissionDenied => StatusCode::FORBIDDEN,

            // 请求格式正确但产品数据不成立
            ProductInvalidPrice
            | ProductInvalidStock
            | VariantFieldReadOnly
            | VariantStockNotOnBase
            | AttributeNameRequired
            | AttributeValueEmpty
            | UnitInvalidConversion
            | BaseUnitRequired => StatusCode::UNPROCESSABLE_ENTITY,

            ValidationFailed | RequiredField => StatusCode::BAD_REQUEST,

            StorageFull => StatusCode::INSUFFICIENT_STORAGE,
            NetworkError => StatusCode::BAD_GATEWAY,

            Unknown | InternalError | DatabaseError | StorageCorrupted => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
