use crate::accounts::AccountDirectory;
use crate::clients::{
    ExperienceClient, MessageClient, ProfileClient, ProjectClient, SkillClient, TechnologyClient,
};
use crate::profile_actor::ProfileContext;
use crate::{
    experience_actor, message_actor, profile_actor, project_actor, skill_actor, technology_actor,
};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Typed clients for every resource. Cheap to clone.
#[derive(Clone)]
pub struct PortfolioClients {
    pub profiles: ProfileClient,
    pub technologies: TechnologyClient,
    pub projects: ProjectClient,
    pub skills: SkillClient,
    pub experiences: ExperienceClient,
    pub messages: MessageClient,
}

/// Starts and stops the resource actors.
///
/// Contexts only point from owners to owned collections (profile to projects, skills and
/// experience; technology to projects), so the actors form an acyclic graph. Dropping
/// every client outside the actors therefore stops all of them.
///
/// # Example
///
/// ```ignore
/// let system = PortfolioSystem::new(32, Arc::new(accounts));
/// let profile = system.clients.profiles.create(params).await?;
/// system.shutdown().await?;
/// ```
pub struct PortfolioSystem {
    pub clients: PortfolioClients,
    handles: Vec<JoinHandle<()>>,
}

impl PortfolioSystem {
    /// Spawns one actor per resource, each with a channel of `buffer_size`.
    pub fn new(buffer_size: usize, accounts: Arc<AccountDirectory>) -> Self {
        let (project_actor, projects) = project_actor::new(buffer_size);
        let (skill_actor, skills) = skill_actor::new(buffer_size);
        let (experience_actor, experiences) = experience_actor::new(buffer_size);
        let (message_actor, messages) = message_actor::new(buffer_size);
        let (technology_actor, technologies) = technology_actor::new(buffer_size);
        let (profile_actor, profiles) = profile_actor::new(buffer_size);

        // Owned collections first, then the actors whose hooks call them.
        let handles = vec![
            tokio::spawn(project_actor.run(())),
            tokio::spawn(skill_actor.run(())),
            tokio::spawn(experience_actor.run(())),
            tokio::spawn(message_actor.run(())),
            tokio::spawn(technology_actor.run(projects.clone())),
            tokio::spawn(profile_actor.run(ProfileContext {
                projects: projects.clone(),
                skills: skills.clone(),
                experiences: experiences.clone(),
            })),
        ];

        let clients = PortfolioClients {
            projects: ProjectClient::new(projects, profiles.clone(), technologies.clone()),
            skills: SkillClient::new(skills, profiles.clone()),
            experiences: ExperienceClient::new(experiences, profiles.clone()),
            messages: MessageClient::new(messages),
            technologies: TechnologyClient::new(technologies),
            profiles: ProfileClient::new(profiles, accounts),
        };

        info!(actors = handles.len(), "Portfolio system started");
        Self { clients, handles }
    }

    /// Drops the clients and waits for every actor to finish.
    ///
    /// Clones of the clients held elsewhere (the HTTP state, say) must be dropped first,
    /// otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down portfolio system");
        drop(self.clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Portfolio system shutdown complete");
        Ok(())
    }
}
