//! Binds each entity to its client and transfer functions.

use crate::api::meta::RequestMeta;
use crate::api::policy::Resource;
use crate::api::server::AppState;
use crate::api::viewset::ViewSet;
use crate::clients::{
    ExperienceClient, MessageClient, ProfileClient, ProjectClient, SkillClient, TechnologyClient,
};
use crate::error::FieldErrors;
use crate::model::{
    AccountId, ContactMessage, ContactMessageCreate, ContactMessageUpdate, Experience,
    ExperienceCreate, ExperienceUpdate, OwnedBy, Profile, ProfileCreate, ProfileFilter, ProfileId,
    ProfileUpdate, Project, ProjectCreate, ProjectFilter, ProjectUpdate, Skill, SkillCreate,
    SkillUpdate, Technology, TechnologyCreate, TechnologyUpdate,
};
use crate::transfer::{self, MediaLinks, Mode};
use serde_json::Value;

pub struct ProfileViewSet;

impl ViewSet for ProfileViewSet {
    const RESOURCE: Resource = Resource::Profile;
    type Record = Profile;
    type Client = ProfileClient;

    fn client(state: &AppState) -> &ProfileClient {
        &state.clients.profiles
    }

    fn owner_filter(owner: u32) -> Option<ProfileFilter> {
        Some(ProfileFilter::Account(AccountId(owner)))
    }

    fn read_create(body: &Value, _meta: &RequestMeta) -> Result<ProfileCreate, FieldErrors> {
        transfer::profile::read_create(body)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<ProfileUpdate, FieldErrors> {
        transfer::profile::read_update(body, mode)
    }

    fn represent(record: &Profile, links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::profile::ProfileRepr::new(record, links))
    }
}

pub struct TechnologyViewSet;

impl ViewSet for TechnologyViewSet {
    const RESOURCE: Resource = Resource::Technologies;
    type Record = Technology;
    type Client = TechnologyClient;

    fn client(state: &AppState) -> &TechnologyClient {
        &state.clients.technologies
    }

    fn read_create(body: &Value, _meta: &RequestMeta) -> Result<TechnologyCreate, FieldErrors> {
        transfer::technology::read_create(body)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<TechnologyUpdate, FieldErrors> {
        transfer::technology::read_update(body, mode)
    }

    fn represent(record: &Technology, _links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::technology::TechnologyRepr::new(record))
    }
}

pub struct ProjectViewSet;

impl ViewSet for ProjectViewSet {
    const RESOURCE: Resource = Resource::Projects;
    type Record = Project;
    type Client = ProjectClient;

    fn client(state: &AppState) -> &ProjectClient {
        &state.clients.projects
    }

    fn owner_filter(owner: u32) -> Option<ProjectFilter> {
        Some(ProjectFilter::Owner(ProfileId(owner)))
    }

    fn read_create(body: &Value, _meta: &RequestMeta) -> Result<ProjectCreate, FieldErrors> {
        transfer::project::read_create(body)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<ProjectUpdate, FieldErrors> {
        transfer::project::read_update(body, mode)
    }

    fn represent(record: &Project, links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::project::ProjectRepr::new(record, links))
    }
}

pub struct SkillViewSet;

impl ViewSet for SkillViewSet {
    const RESOURCE: Resource = Resource::Skills;
    type Record = Skill;
    type Client = SkillClient;

    fn client(state: &AppState) -> &SkillClient {
        &state.clients.skills
    }

    fn owner_filter(owner: u32) -> Option<OwnedBy> {
        Some(OwnedBy(ProfileId(owner)))
    }

    fn read_create(body: &Value, _meta: &RequestMeta) -> Result<SkillCreate, FieldErrors> {
        transfer::skill::read_create(body)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<SkillUpdate, FieldErrors> {
        transfer::skill::read_update(body, mode)
    }

    fn represent(record: &Skill, _links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::skill::SkillRepr::new(record))
    }
}

pub struct ExperienceViewSet;

impl ViewSet for ExperienceViewSet {
    const RESOURCE: Resource = Resource::Experience;
    type Record = Experience;
    type Client = ExperienceClient;

    fn client(state: &AppState) -> &ExperienceClient {
        &state.clients.experiences
    }

    fn owner_filter(owner: u32) -> Option<OwnedBy> {
        Some(OwnedBy(ProfileId(owner)))
    }

    fn read_create(body: &Value, _meta: &RequestMeta) -> Result<ExperienceCreate, FieldErrors> {
        transfer::experience::read_create(body)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<ExperienceUpdate, FieldErrors> {
        transfer::experience::read_update(body, mode)
    }

    fn represent(record: &Experience, _links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::experience::ExperienceRepr::new(record))
    }
}

pub struct MessageViewSet;

impl ViewSet for MessageViewSet {
    const RESOURCE: Resource = Resource::Messages;
    type Record = ContactMessage;
    type Client = MessageClient;

    fn client(state: &AppState) -> &MessageClient {
        &state.clients.messages
    }

    fn read_create(body: &Value, meta: &RequestMeta) -> Result<ContactMessageCreate, FieldErrors> {
        transfer::message::read_create(body, meta.client_ip)
    }

    fn read_update(body: &Value, mode: Mode) -> Result<ContactMessageUpdate, FieldErrors> {
        transfer::message::read_update(body, mode)
    }

    fn represent(record: &ContactMessage, _links: &MediaLinks) -> serde_json::Result<Value> {
        serde_json::to_value(transfer::message::MessageRepr::new(record))
    }
}
