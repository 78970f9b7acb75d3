// src/config/catalog.rs
//! Known campus entities: stable id, display name, kind, and the alternate
//! names third-party pages use for them. Ids are configuration; they never
//! come from markup.

use serde::{Deserialize, Serialize};

use crate::error::HoursError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Residential,
    CampusRetail,
    Library,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Entity {
    pub fn new(id: &str, name: &str, kind: EntityKind, aliases: &[&str]) -> Self {
        Self {
            id: s!(id),
            name: s!(name),
            kind,
            aliases: aliases.iter().map(|a| s!(*a)).collect(),
        }
    }

    /// Display name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn from_json(text: &str) -> Result<Self, HoursError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn builtin() -> Self {
        use EntityKind::*;
        Self::new(vec![
            // Residential
            Entity::new("BruinPlate", "Bruin Plate", Residential, &["Bruin Plate Residential Restaurant"]),
            Entity::new("EpicuriaAtCovel", "Epicuria at Covel", Residential, &["Covel Residential Restaurant", "Covel"]),
            Entity::new("DeNeveDining", "De Neve Dining", Residential, &["De Neve Residential Restaurant", "De Neve"]),
            Entity::new("EpicuriaAtAckerman", "Epicuria at Ackerman", Residential, &["Epicuria"]),
            Entity::new("TheDrey", "The Drey", Residential, &[]),
            Entity::new("TheStudyAtHedrick", "The Study at Hedrick", Residential, &[]),
            Entity::new("Rendezvous", "Rendezvous", Residential, &[]),
            Entity::new("BruinCafe", "Bruin Café", Residential, &[]),
            Entity::new("Cafe1919", "Café 1919", Residential, &[]),
            Entity::new("FEASTAtRieber", "FEAST at Rieber", Residential, &[]),
            // Campus retail
            Entity::new("LollicupFresh", "Lollicup Fresh", CampusRetail, &[]),
            Entity::new("WetzelsPretzels", "Wetzel’s Pretzels", CampusRetail, &[]),
            Entity::new("Sweetspot", "Sweetspot", CampusRetail, &[]),
            Entity::new("PandaExpress", "Panda Express", CampusRetail, &[]),
            Entity::new("Rubios", "Rubio’s", CampusRetail, &[]),
            Entity::new("VeggieGrill", "Veggie Grill", CampusRetail, &[]),
            Entity::new("EpicuriaAck", "Epicuria at Ackerman", CampusRetail, &[]),
            Entity::new("CORE", "CORE (Ready-to-Eat)", CampusRetail, &["CORE"]),
            Entity::new("JambaBlendid", "Jamba by Blendid", CampusRetail, &[]),
            Entity::new("KerckhoffCoffee", "Kerckhoff Coffee House", CampusRetail, &[]),
            Entity::new("NorthernLights", "Northern Lights", CampusRetail, &[]),
            Entity::new("Cafe451", "Cafe 451", CampusRetail, &[]),
            Entity::new("LuValleCommons", "Lu Valle Commons", CampusRetail, &[]),
            Entity::new("CourtOfSciences", "Court of Sciences Student Center", CampusRetail, &[]),
            Entity::new("MusicCafe", "Music Café", CampusRetail, &[]),
            Entity::new("SouthCampusFood", "South Campus Food Court", CampusRetail, &[]),
            // Libraries
            Entity::new("powell", "Powell Library", Library, &["Powell"]),
            Entity::new("youngresearch", "Charles E. Young Research Library", Library, &["Young Research Library", "YRL"]),
            Entity::new("biomed", "Biomedical Library", Library, &["Louise M. Darling Biomedical Library"]),
            Entity::new("music", "Music Library", Library, &[]),
            Entity::new("arts", "Arts Library", Library, &[]),
            Entity::new("management", "Management Library", Library, &["Rosenfeld Management Library"]),
            Entity::new("sel", "Science and Engineering Library", Library, &[]),
            Entity::new("eastasian", "East Asian Library", Library, &["Richard C. Rudolph East Asian Library"]),
            Entity::new("lawlib", "Law Library", Library, &["Hugh & Hazel Darling Law Library"]),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
