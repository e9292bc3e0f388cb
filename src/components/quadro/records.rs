//! Record shapes consumed from the record store.
//!
//! Every linked kind carries exactly one field pointing at a person:
//! `cpfVinculoPrimario` for companies, vehicles, properties, phones,
//! social-media accounts and financial entries, and `cpfEnvolvido` for
//! business links. Field names follow the store's JSON.

use serde::{Deserialize, Serialize};

use super::types::EntityKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpfRecord {
	pub id: u64,
	pub cpf: String,
	pub nome: String,
	pub foto: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CnpjRecord {
	pub id: u64,
	pub cnpj: String,
	pub nome_empresa: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRecord {
	pub id: u64,
	pub placa: String,
	pub marca: String,
	pub modelo: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyRecord {
	pub id: u64,
	pub imovel: String,
	pub endereco: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneRecord {
	pub id: u64,
	pub numero: String,
	pub proprietario_linha: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMediaRecord {
	pub id: u64,
	pub rede_social: String,
	pub nome_rede: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialRecord {
	pub id: u64,
	pub cpf_proprietario: String,
	pub nome_proprietario: String,
	pub cpf_vinculo_primario: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessRecord {
	pub id: u64,
	pub cpf_envolvido: String,
	pub nome_envolvido: String,
}

const ADDRESS_LABEL_CHARS: usize = 30;

/// Borrowed view over one record of any linked kind.
#[derive(Clone, Copy, Debug)]
pub enum LinkedRecord<'a> {
	Cnpj(&'a CnpjRecord),
	Vehicle(&'a VehicleRecord),
	Property(&'a PropertyRecord),
	Phone(&'a PhoneRecord),
	SocialMedia(&'a SocialMediaRecord),
	Financial(&'a FinancialRecord),
	Business(&'a BusinessRecord),
}

impl LinkedRecord<'_> {
	pub fn kind(&self) -> EntityKind {
		match self {
			LinkedRecord::Cnpj(_) => EntityKind::Cnpj,
			LinkedRecord::Vehicle(_) => EntityKind::Vehicle,
			LinkedRecord::Property(_) => EntityKind::Property,
			LinkedRecord::Phone(_) => EntityKind::Phone,
			LinkedRecord::SocialMedia(_) => EntityKind::SocialMedia,
			LinkedRecord::Financial(_) => EntityKind::Financial,
			LinkedRecord::Business(_) => EntityKind::Business,
		}
	}

	pub fn id(&self) -> u64 {
		match self {
			LinkedRecord::Cnpj(r) => r.id,
			LinkedRecord::Vehicle(r) => r.id,
			LinkedRecord::Property(r) => r.id,
			LinkedRecord::Phone(r) => r.id,
			LinkedRecord::SocialMedia(r) => r.id,
			LinkedRecord::Financial(r) => r.id,
			LinkedRecord::Business(r) => r.id,
		}
	}

	/// The person identifier this record hangs off, if any. Blank counts as none.
	pub fn link_cpf(&self) -> Option<&str> {
		let link = match self {
			LinkedRecord::Cnpj(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::Vehicle(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::Property(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::Phone(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::SocialMedia(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::Financial(r) => r.cpf_vinculo_primario.as_deref(),
			LinkedRecord::Business(r) => Some(r.cpf_envolvido.as_str()),
		};
		link.filter(|s| !s.is_empty())
	}

	pub fn display_name(&self) -> String {
		match self {
			LinkedRecord::Cnpj(r) => r.nome_empresa.clone(),
			LinkedRecord::Vehicle(r) => format!("{} {}", r.marca, r.modelo),
			LinkedRecord::Property(r) => {
				let short: String = r.endereco.chars().take(ADDRESS_LABEL_CHARS).collect();
				format!("{short}...")
			}
			LinkedRecord::Phone(r) => r.proprietario_linha.clone(),
			LinkedRecord::SocialMedia(r) => r.nome_rede.clone(),
			LinkedRecord::Financial(r) => r.nome_proprietario.clone(),
			LinkedRecord::Business(r) => r.nome_envolvido.clone(),
		}
	}

	pub fn identifier_value(&self) -> String {
		match self {
			LinkedRecord::Cnpj(r) => r.cnpj.clone(),
			LinkedRecord::Vehicle(r) => r.placa.clone(),
			LinkedRecord::Property(r) => r.imovel.clone(),
			LinkedRecord::Phone(r) => r.numero.clone(),
			LinkedRecord::SocialMedia(r) => r.rede_social.clone(),
			LinkedRecord::Financial(r) => r.cpf_proprietario.clone(),
			LinkedRecord::Business(r) => r.cpf_envolvido.clone(),
		}
	}
}

/// Read-only snapshot of the eight collections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordStore {
	pub cpfs: Vec<CpfRecord>,
	pub cnpjs: Vec<CnpjRecord>,
	pub veiculos: Vec<VehicleRecord>,
	pub imoveis: Vec<PropertyRecord>,
	pub telefones: Vec<PhoneRecord>,
	pub redes_sociais: Vec<SocialMediaRecord>,
	pub financeiros: Vec<FinancialRecord>,
	pub empresariais: Vec<BusinessRecord>,
}

impl RecordStore {
	pub fn from_json(json: &str) -> Result<Self, crate::error::BoardError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Every linked record, grouped by kind (companies, vehicles, properties, phones, social
	/// accounts, financial entries, business ties) and
	/// in collection order within a kind.
	pub fn linked_records(&self) -> impl Iterator<Item = LinkedRecord<'_>> {
		let cnpjs = self.cnpjs.iter().map(LinkedRecord::Cnpj);
		let vehicles = self.veiculos.iter().map(LinkedRecord::Vehicle);
		let properties = self.imoveis.iter().map(LinkedRecord::Property);
		let phones = self.telefones.iter().map(LinkedRecord::Phone);
		let social = self.redes_sociais.iter().map(LinkedRecord::SocialMedia);
		let financial = self.financeiros.iter().map(LinkedRecord::Financial);
		let business = self.empresariais.iter().map(LinkedRecord::Business);
		cnpjs
			.chain(vehicles)
			.chain(properties)
			.chain(phones)
			.chain(social)
			.chain(financial)
			.chain(business)
	}
}
