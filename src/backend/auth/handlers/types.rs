/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/api/auth` endpoints.
 *
 * Every request field is optional at the deserialization level; the
 * `validate` methods check presence and constraints and collect every
 * failure into one `validation_error` response. Field names follow the API's
 * Portuguese boundary spelling (`nome`, `senha`, `nomeEmpresa`, ...).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::backend::auth::accounts::{AccountResponse, Profile};
use crate::backend::auth::service::{ProfileUpdate, Registration};
use crate::shared::{Role, SharedError, Validator};

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

const NAME_LENGTH: &str = "Nome deve ter entre 2 e 100 caracteres";
const PASSWORD_LENGTH: &str = "Senha deve ter pelo menos 6 caracteres";
const ADDRESS_OBJECT: &str = "Endereço deve ser um objeto válido";
const LATITUDE_RANGE: &str = "Latitude deve ser um número válido";
const LONGITUDE_RANGE: &str = "Longitude deve ser um número válido";

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

impl LoginRequest {
    /// Returns the normalized email and trimmed password
    pub fn validate(&self) -> Result<(String, String), SharedError> {
        let mut v = Validator::new();
        let email = v.email("email", self.email.as_deref());
        let senha = v.required("senha", self.senha.as_deref(), "Senha é obrigatória");
        v.finish()?;
        match (email, senha) {
            (Some(email), Some(senha)) => Ok((email, senha)),
            _ => Err(SharedError::validation("email", "Email deve ser válido")),
        }
    }
}

/// Client registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterClientRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub endereco: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Seller registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterSellerRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub telefone: Option<String>,
    pub cnpj: Option<String>,
    #[serde(rename = "nomeEmpresa")]
    pub nome_empresa: Option<String>,
    pub endereco: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Fields shared by both registration variants
struct CommonFields {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: String,
    address: Option<Value>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
fn validate_common(
    v: &mut Validator,
    nome: Option<&str>,
    email: Option<&str>,
    senha: Option<&str>,
    telefone: Option<&str>,
    endereco: Option<&Value>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> CommonFields {
    let name = v.required("nome", nome, "Nome é obrigatório");
    if let Some(name) = &name {
        v.length("nome", name, 2, 100, NAME_LENGTH);
    }
    let email = v.email("email", email);
    let password = checked_password(v, senha.unwrap_or_default());
    let phone = v.optional(telefone).unwrap_or_default();
    let address = validate_address(v, endereco);

    CommonFields {
        name,
        email,
        password,
        phone,
        address,
        latitude: v.range("latitude", latitude, -90.0, 90.0, LATITUDE_RANGE),
        longitude: v.range("longitude", longitude, -180.0, 180.0, LONGITUDE_RANGE),
    }
}

/// Length is checked on the password as sent; what gets hashed is trimmed
fn checked_password(v: &mut Validator, senha: &str) -> Option<String> {
    if v.check(senha.chars().count() >= MIN_PASSWORD_LEN, "senha", PASSWORD_LENGTH) {
        Some(senha.trim().to_string())
    } else {
        None
    }
}

fn validate_address(v: &mut Validator, endereco: Option<&Value>) -> Option<Value> {
    match endereco {
        Some(value) if value.is_object() => Some(value.clone()),
        Some(_) => {
            v.check(false, "endereco", ADDRESS_OBJECT);
            None
        }
        None => None,
    }
}

fn into_registration(common: CommonFields, profile: Profile) -> Result<Registration, SharedError> {
    match (common.name, common.email, common.password) {
        (Some(name), Some(email), Some(password)) => Ok(Registration {
            name,
            email,
            password,
            phone: common.phone,
            profile,
            address: common.address.unwrap_or_else(|| Value::Object(Default::default())),
            latitude: common.latitude,
            longitude: common.longitude,
        }),
        _ => Err(SharedError::validation("nome", "Nome é obrigatório")),
    }
}

impl RegisterClientRequest {
    pub fn validate(&self) -> Result<Registration, SharedError> {
        let mut v = Validator::new();
        let common = validate_common(
            &mut v,
            self.nome.as_deref(),
            self.email.as_deref(),
            self.senha.as_deref(),
            self.telefone.as_deref(),
            self.endereco.as_ref(),
            self.latitude,
            self.longitude,
        );
        let cpf = v.optional(self.cpf.as_deref());
        v.finish()?;
        into_registration(common, Profile::Client { cpf })
    }
}

impl RegisterSellerRequest {
    pub fn validate(&self) -> Result<Registration, SharedError> {
        let mut v = Validator::new();
        let common = validate_common(
            &mut v,
            self.nome.as_deref(),
            self.email.as_deref(),
            self.senha.as_deref(),
            self.telefone.as_deref(),
            self.endereco.as_ref(),
            self.latitude,
            self.longitude,
        );
        let cnpj = v.required("cnpj", self.cnpj.as_deref(), "CNPJ é obrigatório para vendedores");
        let company_name = v.required(
            "nomeEmpresa",
            self.nome_empresa.as_deref(),
            "Nome da empresa é obrigatório",
        );
        v.finish()?;
        match (cnpj, company_name) {
            (Some(cnpj), Some(company_name)) => into_registration(common, Profile::Seller { cnpj, company_name }),
            _ => Err(SharedError::validation("cnpj", "CNPJ é obrigatório para vendedores")),
        }
    }
}

/// Profile update request; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "nomeEmpresa")]
    pub nome_empresa: Option<String>,
    pub endereco: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub senha: Option<String>,
}

impl UpdateProfileRequest {
    /// Validate against the caller's role
    ///
    /// `cpf` is rejected for sellers and `nomeEmpresa` for clients.
    pub fn validate(&self, role: Role) -> Result<ProfileUpdate, SharedError> {
        let mut v = Validator::new();

        let name = match self.nome.as_deref() {
            Some(nome) => {
                let nome = nome.trim().to_string();
                v.length("nome", &nome, 2, 100, NAME_LENGTH);
                Some(nome)
            }
            None => None,
        };
        let password = self.senha.as_deref().and_then(|senha| checked_password(&mut v, senha));
        let cpf = v.optional(self.cpf.as_deref());
        v.check(
            cpf.is_none() || role == Role::Client,
            "cpf",
            "CPF só pode ser informado por clientes",
        );
        let company_name = v.optional(self.nome_empresa.as_deref());
        v.check(
            company_name.is_none() || role == Role::Seller,
            "nomeEmpresa",
            "Nome da empresa só pode ser informado por vendedores",
        );

        let update = ProfileUpdate {
            name,
            phone: self.telefone.as_deref().map(|t| t.trim().to_string()),
            cpf,
            company_name,
            address: validate_address(&mut v, self.endereco.as_ref()),
            latitude: v.range("latitude", self.latitude, -90.0, 90.0, LATITUDE_RANGE),
            longitude: v.range("longitude", self.longitude, -180.0, 180.0, LONGITUDE_RANGE),
            password,
        };
        v.finish()?;
        Ok(update)
    }
}

/// Login, registration and refresh response
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: AccountResponse,
    #[serde(rename = "expiresIn")]
    pub expires_in: String,
}

/// Decoded token metadata returned by verify
#[derive(Serialize, Debug)]
pub struct TokenInfo {
    pub id: Uuid,
    pub email: String,
    pub tipo: Role,
    pub iat: DateTime<Utc>,
    pub exp: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct VerifyResponse {
    pub message: String,
    pub user: AccountResponse,
    #[serde(rename = "tokenInfo")]
    pub token_info: TokenInfo,
}

#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub message: String,
    pub user: AccountResponse,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}
