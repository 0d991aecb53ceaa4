use serde::{Deserialize, Serialize};

use afiya_core::{DomainError, DomainResult, Entity, FormMode, LocalizedText, TeamMemberId};

/// Departments offered by the team form. The wire value stays an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Management,
    Medical,
    Support,
    Marketing,
    Technical,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Management => "management",
            Department::Medical => "medical",
            Department::Support => "support",
            Department::Marketing => "marketing",
            Department::Technical => "technical",
        }
    }
}

fn default_department() -> String {
    Department::Management.as_str().to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(alias = "_id")]
    pub id: TeamMemberId,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub position: LocalizedText,
    #[serde(default)]
    pub bio: LocalizedText,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_department")]
    pub department: String,
    /// Display rank on the public team page.
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Entity for TeamMember {
    type Id = TeamMemberId;

    fn id(&self) -> &TeamMemberId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberPayload {
    pub name: LocalizedText,
    pub position: LocalizedText,
    pub bio: LocalizedText,
    pub image: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberDraft {
    pub mode: FormMode<TeamMemberId>,
    pub name: LocalizedText,
    pub position: LocalizedText,
    pub bio: LocalizedText,
    pub image: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub order: i32,
    pub is_active: bool,
}

impl Default for TeamMemberDraft {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            name: LocalizedText::default(),
            position: LocalizedText::default(),
            bio: LocalizedText::default(),
            image: String::new(),
            email: String::new(),
            phone: String::new(),
            department: default_department(),
            order: 0,
            is_active: true,
        }
    }
}

impl TeamMemberDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(member: &TeamMember) -> Self {
        Self {
            mode: FormMode::Edit(member.id.clone()),
            name: member.name.clone(),
            position: member.position.clone(),
            bio: member.bio.clone(),
            image: member.image.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            department: member.department.clone(),
            order: member.order,
            is_active: member.is_active,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.name.is_complete() {
            return Err(DomainError::validation(
                "Please fill in both English and Arabic names",
            ));
        }
        if !self.position.is_complete() {
            return Err(DomainError::validation(
                "Please fill in both English and Arabic positions",
            ));
        }
        if !self.bio.is_complete() {
            return Err(DomainError::validation(
                "Please fill in both English and Arabic bios",
            ));
        }
        if self.image.trim().is_empty() {
            return Err(DomainError::validation("Please enter an image URL"));
        }
        Ok(())
    }

    pub fn into_payload(self) -> DomainResult<TeamMemberPayload> {
        self.validate()?;
        Ok(TeamMemberPayload {
            name: self.name,
            position: self.position,
            bio: self.bio,
            image: self.image,
            email: self.email,
            phone: self.phone,
            department: self.department,
            order: self.order,
            is_active: self.is_active,
        })
    }
}
