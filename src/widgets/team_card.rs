use hypertext::prelude::*;

use crate::{features::HeadToHead, teams::Team};

pub struct TeamCard {
    pub team: Team,
}

impl Renderable for TeamCard {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="col text-center" {
                img src=(self.team.logo_url()) alt=(self.team.code) width="100";
                p class="fw-bold mt-2" { (self.team.name) }
            }
        }
        .render_to(buffer);
    }
}

pub struct HeadToHeadCard {
    pub team1: Team,
    pub team2: Team,
    pub record: HeadToHead,
}

impl Renderable for HeadToHeadCard {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="card mb-3" {
                div class="card-body" {
                    h5 class="card-title" { "📊 Head-to-Head Stats" }
                    p class="card-text mb-1" {
                        "Total Matches: " (self.record.matches)
                    }
                    p class="card-text mb-1" {
                        (self.team1.name) " Wins: " (self.record.first_wins)
                    }
                    p class="card-text" {
                        (self.team2.name) " Wins: " (self.record.second_wins)
                    }
                }
            }
        }
        .render_to(buffer);
    }
}
