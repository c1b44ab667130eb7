//! The ten franchises the form offers, with their display names and logos.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub code: &'static str,
    pub name: &'static str,
    /// File name of the logo inside the logo directory.
    pub logo: &'static str,
}

/// In the order the form lists them.
pub const TEAMS: [Team; 10] = [
    Team { code: "MI", name: "Mumbai Indians", logo: "mi.jpg" },
    Team { code: "RCB", name: "Royal Challengers Bangalore", logo: "RCB.png" },
    Team { code: "CSK", name: "Chennai Super Kings", logo: "csk.jpg" },
    Team { code: "DC", name: "Delhi Capitals", logo: "dc.jpg" },
    Team { code: "KKR", name: "Kolkata Knight Riders", logo: "kkr.jpg" },
    Team { code: "SRH", name: "Sunrisers Hyderabad", logo: "srh.jpg" },
    Team { code: "GT", name: "Gujarat Titans", logo: "GT.png" },
    Team { code: "LSG", name: "Lucknow Super Giants", logo: "lsg.jpg" },
    Team { code: "RR", name: "Rajasthan Royals", logo: "rr.jpg" },
    Team { code: "PBKS", name: "Punjab Kings", logo: "pbks.jpg" },
];

impl Team {
    pub fn by_code(code: &str) -> Option<Team> {
        TEAMS.iter().find(|t| t.code == code).copied()
    }

    pub fn logo_url(&self) -> String {
        format!("/logos/{}", self.logo)
    }
}
