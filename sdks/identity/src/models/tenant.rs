use std::fmt;

use serde::{Deserialize, Serialize};

use idc_http::MultipartForm;

/// Two-letter US state/district codes accepted by the backend.
///
/// Variant names are the wire values, so serde needs no renames and
/// [`as_str`](UsState::as_str) stays in lock-step with the serialized form.
macro_rules! us_states {
    ($($code:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum UsState {
            $($code,)+
        }

        impl UsState {
            /// The two-letter code as sent on the wire.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(UsState::$code => stringify!($code),)+
                }
            }
        }
    };
}

us_states!(
    AL, AK, AR, AZ, CA, CO, CT, DC, DE, FL, GA, HI, IA, ID, IL, IN, KS, KY, LA, MA, MD, ME, MI,
    MN, MO, MS, MT, NC, ND, NE, NH, NJ, NM, NV, NY, OK, OH, OR, PA, RI, SC, SD, TN, TX, UT, VA,
    VT, WA, WI, WV, WY,
);

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_city: Option<String>,
    pub tenant_state: UsState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date_time: Option<String>,
    pub is_active: bool,
}

/// Payload for `POST /tenants`.
///
/// This endpoint takes multipart/form-data, not JSON — see
/// [`to_form`](Self::to_form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub tenant_name: String,
    pub tenant_address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_address2: Option<String>,
    pub tenant_city: String,
    pub tenant_state: UsState,
    pub tenant_zip: String,
    pub tenant_phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_fax: Option<String>,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_mobile_phone: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CreateTenantRequest {
    /// Encode as the multipart form the backend expects: one text part per
    /// set field, wire (camelCase) names, `None` fields omitted.
    #[must_use]
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("tenantName", &self.tenant_name)
            .text("tenantAddress1", &self.tenant_address1);
        if let Some(ref address2) = self.tenant_address2 {
            form = form.text("tenantAddress2", address2);
        }
        form = form
            .text("tenantCity", &self.tenant_city)
            .text("tenantState", self.tenant_state.as_str())
            .text("tenantZip", &self.tenant_zip)
            .text("tenantPhoneNumber", &self.tenant_phone_number);
        if let Some(ref fax) = self.tenant_fax {
            form = form.text("tenantFax", fax);
        }
        form = form
            .text("contactFirstName", &self.contact_first_name)
            .text("contactLastName", &self.contact_last_name)
            .text("contactMobilePhone", &self.contact_mobile_phone)
            .text("contactEmail", &self.contact_email);
        if let Some(ref password) = self.password {
            form = form.text("password", password);
        }
        form
    }
}

/// Payload for `PUT /tenants/{id}` (JSON, unlike creation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    pub tenant_name: String,
    pub tenant_address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_address2: Option<String>,
    pub tenant_city: String,
    pub tenant_state: UsState,
    pub tenant_zip: String,
    pub tenant_phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_fax: Option<String>,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_mobile_phone: String,
    pub contact_email: String,
}
