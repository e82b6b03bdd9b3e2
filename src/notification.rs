use anyhow::{bail, Result};

use crate::model::{DateRange, Person, Schedule, Shift};

/// Rôle porté par une invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteRole {
    Primary,
    Backup,
}

/// Invitation calendrier générée pour un créneau.
#[derive(Debug, Clone)]
pub struct Invite {
    pub attendee: String,
    pub title: String,
    pub dates: DateRange,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, mail, etc.).
pub trait InviteRenderer {
    fn render(&self, person: &Person, shift: &Shift, role: InviteRole) -> String;
}

/// Gabarit texte simple destiné à un futur mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextInvite;

impl InviteRenderer for TextInvite {
    fn render(&self, person: &Person, shift: &Shift, role: InviteRole) -> String {
        let role = match role {
            InviteRole::Primary => "titulaire",
            InviteRole::Backup => "remplaçant",
        };
        format!(
            "Bonjour {name},\n\nTu es de garde ({role}) pour le créneau \"{shift}\" du {start} au {end} (inclus).\n\nMerci de te préparer et de vérifier ton matériel.\n",
            name = person.full_name,
            role = role,
            shift = shift.title,
            start = shift.dates.start,
            end = shift.dates.end
        )
    }
}

/// Prépare deux invitations par créneau : une pour le titulaire, une
/// suffixée pour le remplaçant. Échoue si un créneau n'est pas
/// complètement assigné.
pub fn prepare_invites(schedule: &Schedule, renderer: &dyn InviteRenderer) -> Result<Vec<Invite>> {
    let mut out = Vec::with_capacity(schedule.shifts.len() * 2);
    for shift in &schedule.shifts {
        let (Some(person), Some(backup)) = (&shift.person, &shift.backup_person) else {
            bail!("shift '{}' is not fully assigned", shift.title);
        };
        out.push(Invite {
            attendee: person.email.clone(),
            title: shift.title.clone(),
            dates: shift.dates,
            content: renderer.render(person, shift, InviteRole::Primary),
        });
        out.push(Invite {
            attendee: backup.email.clone(),
            title: format!("{} - remplaçant", shift.title),
            dates: shift.dates,
            content: renderer.render(backup, shift, InviteRole::Backup),
        });
    }
    Ok(out)
}
