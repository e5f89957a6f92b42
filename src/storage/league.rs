//! Player directory and match store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{Match, MatchId, MatchSubmission, Player, PlayerId};
use crate::scoring::MatchRejection;

/// Why a player could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Nickname cannot be empty")]
    EmptyNickname,

    #[error("Nickname '{0}' is already taken")]
    NicknameTaken(String),

    #[error("Licence number must contain digits only, got '{0}'")]
    InvalidLicense(String),

    #[error("Licence number {0} is already registered")]
    LicenseTaken(String),
}

/// Errors from league store operations.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("Match rejected: {0}")]
    Rejected(#[from] MatchRejection),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("No player with licence number {0}")]
    LicenseNotFound(String),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("Player {editor} did not report match {match_id} and cannot edit it")]
    NotMatchOwner { match_id: MatchId, editor: PlayerId },
}

/// Registration request for a new player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub nickname: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub single_ranking_points: Option<u32>,
}

/// Players and matches backed by JSONL files.
///
/// The store does not lock; callers serialize writes.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    config: StorageConfig,
}

impl LeagueStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// All players, sorted by nickname.
    pub fn players(&self) -> Result<Vec<Player>, StorageError> {
        let mut players =
            JsonlReader::<Player>::for_entity(&self.config, EntityType::Player).read_all()?;
        players.sort_by(|a, b| {
            a.nickname
                .to_lowercase()
                .cmp(&b.nickname.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(players)
    }

    pub fn player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        Ok(self.players()?.into_iter().find(|p| p.id == id))
    }

    /// Register a player after checking nickname and licence uniqueness.
    pub fn register_player(&self, request: NewPlayer) -> Result<Player, LeagueError> {
        let players = self.players()?;

        let nickname = request.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(RegistrationError::EmptyNickname.into());
        }
        let folded = nickname.to_lowercase();
        if players.iter().any(|p| p.nickname.to_lowercase() == folded) {
            return Err(RegistrationError::NicknameTaken(nickname).into());
        }

        let license_number = match request.license_number.as_deref().map(str::trim) {
            Some(license) => {
                if license.is_empty() || !license.chars().all(|c| c.is_ascii_digit()) {
                    return Err(RegistrationError::InvalidLicense(license.to_string()).into());
                }
                if players
                    .iter()
                    .any(|p| p.license_number.as_deref() == Some(license))
                {
                    return Err(RegistrationError::LicenseTaken(license.to_string()).into());
                }
                Some(license.to_string())
            }
            None => None,
        };

        let id = players
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(PlayerId::new(1), |id| id.next());

        let player = Player {
            id,
            nickname,
            license_number,
            single_ranking_points: request.single_ranking_points,
            created_at: Utc::now(),
        };
        JsonlWriter::for_entity(&self.config, EntityType::Player).append(&player)?;
        info!("Registered player {} ({})", player.nickname, player.id);

        Ok(player)
    }

    /// Overwrite the singles ranking points of the player holding `license`.
    pub fn update_ranking_points(&self, license: &str, points: u32) -> Result<Player, LeagueError> {
        let license = license.trim();
        let mut players =
            JsonlReader::<Player>::for_entity(&self.config, EntityType::Player).read_all()?;

        let player = players
            .iter_mut()
            .find(|p| p.license_number.as_deref() == Some(license))
            .ok_or_else(|| LeagueError::LicenseNotFound(license.to_string()))?;
        let previous = player.single_ranking_points.replace(points);
        let updated = player.clone();

        players.sort_by_key(|p| p.id);
        JsonlWriter::for_entity(&self.config, EntityType::Player).write_all(&players)?;
        info!(
            "Ranking points of {} set to {} (was {:?})",
            updated.nickname, points, previous
        );

        Ok(updated)
    }

    /// Every recorded match, newest first.
    pub fn matches(&self) -> Result<Vec<Match>, StorageError> {
        let matches =
            JsonlReader::<Match>::for_entity(&self.config, EntityType::Match).read_all()?;
        Ok(newest_first(matches))
    }

    /// Matches involving `player`, newest first.
    pub fn matches_for(&self, player: PlayerId) -> Result<Vec<Match>, StorageError> {
        let matches = JsonlReader::<Match>::for_entity(&self.config, EntityType::Match)
            .read_where(|m| m.involves(player))?;
        Ok(newest_first(matches))
    }

    fn ensure_players_exist(&self, submission: &MatchSubmission) -> Result<(), LeagueError> {
        let players = self.players()?;
        for id in [submission.player1_id, submission.player2_id] {
            if !players.iter().any(|p| p.id == id) {
                return Err(LeagueError::PlayerNotFound(id));
            }
        }
        Ok(())
    }

    /// Validate and append a new match.
    pub fn record_match(&self, submission: MatchSubmission) -> Result<Match, LeagueError> {
        self.ensure_players_exist(&submission)?;

        let id = self
            .matches()?
            .iter()
            .map(|m| m.id)
            .max()
            .map_or(MatchId::new(1), |id| id.next());

        let recorded = Match::new(id, submission).map_err(|e| {
            warn!("Rejected match submission: {}", e);
            e
        })?;
        JsonlWriter::for_entity(&self.config, EntityType::Match).append(&recorded)?;
        info!(
            "Recorded match {}: {} vs {} on {} ({}-{})",
            recorded.id,
            recorded.player1_id,
            recorded.player2_id,
            recorded.match_date,
            recorded.player1_sets,
            recorded.player2_sets
        );

        Ok(recorded)
    }

    /// Replace a match's opponent, date and scores.
    ///
    /// Only the player who reported the match may edit it, and they stay side 1.
    pub fn amend_match(
        &self,
        match_id: MatchId,
        editor: PlayerId,
        submission: MatchSubmission,
    ) -> Result<Match, LeagueError> {
        let mut matches = self.matches()?;
        let existing = matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound(match_id))?;

        if existing.player1_id != editor || submission.player1_id != editor {
            return Err(LeagueError::NotMatchOwner { match_id, editor });
        }
        self.ensure_players_exist(&submission)?;

        existing.amend(submission).map_err(|e| {
            warn!("Rejected amendment of match {}: {}", match_id, e);
            e
        })?;
        let amended = existing.clone();

        // Keep the file in id order.
        matches.sort_by_key(|m| m.id);
        JsonlWriter::for_entity(&self.config, EntityType::Match).write_all(&matches)?;
        info!("Amended match {}", match_id);

        Ok(amended)
    }
}

fn newest_first(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by(|a, b| b.match_date.cmp(&a.match_date).then_with(|| b.id.cmp(&a.id)));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SetScore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> LeagueStore {
        LeagueStore::new(StorageConfig::new(temp_dir.path().to_path_buf()))
    }

    fn new_player(nickname: &str, license: Option<&str>) -> NewPlayer {
        NewPlayer {
            nickname: nickname.to_string(),
            license_number: license.map(str::to_string),
            single_ranking_points: None,
        }
    }

    fn submission(p1: u32, p2: u32, date: &str, sets: &[(u32, u32)]) -> MatchSubmission {
        MatchSubmission {
            player1_id: PlayerId::new(p1),
            player2_id: PlayerId::new(p2),
            match_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            sets: sets.iter().map(|&(a, b)| SetScore::new(a, b)).collect(),
        }
    }

    fn seeded(temp_dir: &TempDir) -> LeagueStore {
        let store = store(temp_dir);
        store.register_player(new_player("Alex", Some("100"))).unwrap();
        store.register_player(new_player("bea", Some("200"))).unwrap();
        store.register_player(new_player("Cyd", None)).unwrap();
        store
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let players = store.players().unwrap();
        let names: Vec<&str> = players.iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(names, vec!["Alex", "bea", "Cyd"]);
        assert_eq!(players[2].id, PlayerId::new(3));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let err = store.register_player(new_player("ALEX", None)).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Registration(RegistrationError::NicknameTaken(_))
        ));

        let err = store.register_player(new_player("Dan", Some("200"))).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Registration(RegistrationError::LicenseTaken(_))
        ));
    }

    #[test]
    fn test_register_validates_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let err = store.register_player(new_player("   ", None)).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Registration(RegistrationError::EmptyNickname)
        ));

        let err = store.register_player(new_player("Dan", Some("12a4"))).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Registration(RegistrationError::InvalidLicense(_))
        ));
        assert!(store.players().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_nickname_differing_in_accented_case() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.register_player(new_player("Élodie", None)).unwrap();

        let err = store.register_player(new_player("élodie", None)).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Registration(RegistrationError::NicknameTaken(_))
        ));
        assert_eq!(store.players().unwrap().len(), 1);
    }

    #[test]
    fn test_update_ranking_points() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let updated = store.update_ranking_points(" 200 ", 1450).unwrap();
        assert_eq!(updated.id, PlayerId::new(2));
        assert_eq!(updated.single_ranking_points, Some(1450));

        let players = store.players().unwrap();
        assert_eq!(players.len(), 3);
        let bea = store.player(PlayerId::new(2)).unwrap().unwrap();
        assert_eq!(bea, updated);
        let alex = store.player(PlayerId::new(1)).unwrap().unwrap();
        assert_eq!(alex.single_ranking_points, None);

        // The next registration still gets a fresh id.
        let dan = store.register_player(new_player("Dan", None)).unwrap();
        assert_eq!(dan.id, PlayerId::new(4));
    }

    #[test]
    fn test_update_ranking_points_unknown_license() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let err = store.update_ranking_points("999", 10).unwrap_err();
        assert!(matches!(err, LeagueError::LicenseNotFound(ref l) if l == "999"));
        assert!(store
            .players()
            .unwrap()
            .iter()
            .all(|p| p.single_ranking_points.is_none()));
    }

    #[test]
    fn test_record_match() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let first = store
            .record_match(submission(1, 2, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap();
        let second = store
            .record_match(submission(3, 1, "2025-03-05", &[(21, 10), (15, 21), (21, 19)]))
            .unwrap();

        assert_eq!(first.id, MatchId::new(1));
        assert_eq!(second.id, MatchId::new(2));
        assert_eq!((second.player1_sets, second.player2_sets), (2, 1));

        let ids: Vec<u32> = store.matches().unwrap().iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(store.matches_for(PlayerId::new(2)).unwrap().len(), 1);
    }

    #[test]
    fn test_record_match_rejections_are_not_stored() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);

        let err = store
            .record_match(submission(1, 2, "2025-03-02", &[(21, 20), (21, 15)]))
            .unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Rejected(MatchRejection::InvalidSetScore { set_index: 0, .. })
        ));

        let err = store
            .record_match(submission(1, 1, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap_err();
        assert!(matches!(err, LeagueError::Rejected(MatchRejection::SelfPlay { .. })));

        let err = store
            .record_match(submission(1, 9, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap_err();
        assert!(matches!(err, LeagueError::PlayerNotFound(id) if id == PlayerId::new(9)));

        assert!(store.matches().unwrap().is_empty());
    }

    #[test]
    fn test_amend_match() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);
        store
            .record_match(submission(1, 2, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap();
        store
            .record_match(submission(2, 3, "2025-03-03", &[(21, 10), (21, 15)]))
            .unwrap();

        let amended = store
            .amend_match(
                MatchId::new(1),
                PlayerId::new(1),
                submission(1, 3, "2025-04-01", &[(10, 21), (21, 15), (19, 21)]),
            )
            .unwrap();

        assert_eq!(amended.player2_id, PlayerId::new(3));
        assert_eq!((amended.month, amended.year), (4, 2025));
        assert_eq!(amended.winner(), Some(PlayerId::new(3)));

        let stored = store.matches().unwrap();
        assert_eq!(stored.len(), 2);
        let reloaded = stored.iter().find(|m| m.id == MatchId::new(1)).unwrap();
        assert_eq!(reloaded, &amended);
    }

    #[test]
    fn test_amend_requires_reporting_player() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);
        store
            .record_match(submission(1, 2, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap();

        let err = store
            .amend_match(
                MatchId::new(1),
                PlayerId::new(2),
                submission(2, 1, "2025-03-02", &[(21, 10), (21, 15)]),
            )
            .unwrap_err();
        assert!(matches!(err, LeagueError::NotMatchOwner { .. }));

        let err = store
            .amend_match(
                MatchId::new(7),
                PlayerId::new(1),
                submission(1, 2, "2025-03-02", &[(21, 10), (21, 15)]),
            )
            .unwrap_err();
        assert!(matches!(err, LeagueError::MatchNotFound(_)));
    }

    #[test]
    fn test_rejected_amend_keeps_stored_match() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded(&temp_dir);
        let original = store
            .record_match(submission(1, 2, "2025-03-02", &[(21, 10), (21, 15)]))
            .unwrap();

        let err = store
            .amend_match(
                MatchId::new(1),
                PlayerId::new(1),
                submission(1, 2, "2025-03-02", &[(21, 10), (21, 15), (21, 3)]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Rejected(MatchRejection::InconsistentThirdSet)
        ));
        assert_eq!(store.matches().unwrap(), vec![original]);
    }
}
