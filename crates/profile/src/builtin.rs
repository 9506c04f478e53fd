use std::collections::BTreeMap;

use crate::types::{
    Achievement, ContactInfo, Education, Experience, PersonalInfo, Portfolio, Project,
    ProjectLink, Publication, SkillCategory,
};

/// The built-in profile shipped with the application.
///
/// Serves as the figment default layer: an override file or environment
/// variables may replace any subset of it, and a missing or malformed
/// override falls back to exactly this data.
pub fn builtin_portfolio() -> Portfolio {
    Portfolio {
        name: "Alokparna Mitra".to_string(),
        title: "Full-Stack Developer".to_string(),
        contact: ContactInfo {
            location: "Kolkata, WB".to_string(),
            phone: "+91 96473 25707".to_string(),
            email: "k.19.alokparnamitra@gmail.com".to_string(),
            github: "https://github.com/Flamingo27".to_string(),
            linkedin: "https://www.linkedin.com/in/alokparna-mitra/".to_string(),
            portfolio_url: "https://portfolio-alokparna.pages.dev".to_string(),
        },
        education: vec![
            Education {
                institution: "Institute of Engineering & Management (IEM)".to_string(),
                degree: "B.Tech in Computer Science & Engineering".to_string(),
                score: "9.1 GPA".to_string(),
                duration: "2024 – Present".to_string(),
                logo: "iem_logo".to_string(),
                location: "Salt Lake, Kolkata, WB".to_string(),
                highlight: true,
            },
            Education {
                institution: "Burdwan Model School".to_string(),
                degree: "Senior Secondary (CBSE) — PCM Stream with Computer Science".to_string(),
                score: "84.4%".to_string(),
                duration: "2022 – 2024".to_string(),
                logo: "bms_logo".to_string(),
                location: "Burdwan, WB".to_string(),
                highlight: false,
            },
            Education {
                institution: "St. Paul's Academy".to_string(),
                degree: "Secondary (ICSE)".to_string(),
                score: "98.6%".to_string(),
                duration: "2012 – 2022".to_string(),
                logo: "spa_logo".to_string(),
                location: "Burdwan, WB".to_string(),
                highlight: true,
            },
        ],
        experience: vec![
            Experience {
                company: "Cura Horizon".to_string(),
                role: "Co-Founder".to_string(),
                duration: "2024–Present".to_string(),
                description: "Developing an AI-integrated healthcare platform with hospital \
                              finder, emergency medicine assistance, and IoT device integration."
                    .to_string(),
                highlights: vec![
                    "Built the core web UI, logic flow, and early-stage AI-assisted modules."
                        .to_string(),
                    "Designed and prototyped IoT-based emergency response features.".to_string(),
                    "Created pitch materials, documentation, and technical explanations for \
                     presentations."
                        .to_string(),
                    "Launched the functional prototype — view the Live Demo.".to_string(),
                    "Published implementation details — refer to the TechMag Report for deeper \
                     insights."
                        .to_string(),
                ],
                links: BTreeMap::from([
                    (
                        "demo".to_string(),
                        "https://cura-horizon-healthai.netlify.app/".to_string(),
                    ),
                    (
                        "report".to_string(),
                        "https://drive.google.com/file/d/1jGCZQ3055R2RPwNjKay2eU8RVlV4QWUS/view?usp=drive_open"
                            .to_string(),
                    ),
                ]),
                color: vec!["#06B6D4".to_string(), "#3B82F6".to_string()],
                logo: "cura_horizon_logo".to_string(),
                location: "Remote".to_string(),
            },
            Experience {
                company: "IIC, IIFR".to_string(),
                role: "Lab Intern".to_string(),
                duration: "2024–Present".to_string(),
                description: "Prototyped healthcare-focused hardware-software solutions using \
                              embedded systems and IoT development tools."
                    .to_string(),
                highlights: vec![
                    "Developed solutions using Raspberry Pi and Arduino.".to_string(),
                    "Implemented MicroPython-based logic for IoT applications.".to_string(),
                    "Built early-stage healthcare device prototypes.".to_string(),
                ],
                links: BTreeMap::new(),
                color: vec!["#3B82F6".to_string(), "#06B6D4".to_string()],
                logo: "iic_logo".to_string(),
                location: "Kolkata, WB".to_string(),
            },
            Experience {
                company: "IETE IEM Students' Forum".to_string(),
                role: "Social Media Manager".to_string(),
                duration: "2025–Present".to_string(),
                description: "Managing digital presence and improving engagement across multiple \
                              social platforms."
                    .to_string(),
                highlights: vec![
                    "Managed LinkedIn, Instagram, and Facebook brand accounts.".to_string(),
                    "Designed content strategy to boost engagement.".to_string(),
                    "Increased forum visibility and community reach.".to_string(),
                ],
                links: BTreeMap::new(),
                color: vec!["#06B6D4".to_string(), "#14B8A6".to_string()],
                logo: "iete_logo".to_string(),
                location: "Kolkata, WB".to_string(),
            },
        ],
        projects: vec![
            Project {
                title: "UNICRED".to_string(),
                subtitle: "Blockchain Credential Verification System".to_string(),
                description: "Developed secure credential verification portal with frontend \
                              workflows and integration pipelines using blockchain technology."
                    .to_string(),
                tech: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "Kotlin".to_string(),
                    "PostgreSQL".to_string(),
                    "Solidity".to_string(),
                ],
                achievement: "Top 5 Finalist at GDG HackBuild, VIT Mumbai".to_string(),
                links: vec![
                    ProjectLink {
                        label: "Live Demo".to_string(),
                        url: "https://unicred-portal.debarghaya.in".to_string(),
                        kind: Some("demo".to_string()),
                    },
                    ProjectLink {
                        label: "Project Drive Folder".to_string(),
                        url: "https://drive.google.com/drive/folders/1K-i6kuuBj0G23VyYOGL7jthsgrd2gHMd"
                            .to_string(),
                        kind: Some("drive".to_string()),
                    },
                ],
                image: "project_unicred".to_string(),
                gradient: vec!["#06B6D4".to_string(), "#3B82F6".to_string()],
            },
            Project {
                title: "Smart Irrigation System".to_string(),
                subtitle: "Arduino UNO Based Automated Irrigation".to_string(),
                description: "Designed a sensor-based irrigation automation system using soil \
                              moisture sensing and microcontroller logic. The system \
                              intelligently controls water flow to optimize plant hydration and \
                              reduce water waste."
                    .to_string(),
                tech: vec![
                    "Arduino UNO".to_string(),
                    "Soil Moisture Sensor".to_string(),
                    "Embedded C".to_string(),
                    "IoT Logic".to_string(),
                ],
                achievement: String::new(),
                links: Vec::new(),
                image: "project_irrigation".to_string(),
                gradient: vec!["#22C55E".to_string(), "#14B8A6".to_string()],
            },
            Project {
                title: "Smart Stocks".to_string(),
                subtitle: "Automated Inventory Management".to_string(),
                description: "Built responsive inventory automation system with product listing, \
                              search, and stock updates to reduce manual errors."
                    .to_string(),
                tech: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "MySQL".to_string(),
                    "REST APIs".to_string(),
                ],
                achievement: String::new(),
                links: Vec::new(),
                image: "project_stocks".to_string(),
                gradient: vec!["#14B8A6".to_string(), "#06B6D4".to_string()],
            },
            Project {
                title: "Assistive Healthcare Devices".to_string(),
                subtitle: "Alzheimer's Glass & Accu-Pressure Glove".to_string(),
                description: "Created innovative healthcare devices with audio/video assistance \
                              and accessible UI/UX using Raspberry Pi."
                    .to_string(),
                tech: vec![
                    "Raspberry Pi".to_string(),
                    "Python".to_string(),
                    "IoT".to_string(),
                    "UI/UX".to_string(),
                ],
                achievement: String::new(),
                links: vec![ProjectLink {
                    label: "Live Demo".to_string(),
                    url: "https://dem-sim.netlify.app".to_string(),
                    kind: Some("demo".to_string()),
                }],
                image: "project_assistive".to_string(),
                gradient: vec!["#0891B2".to_string(), "#3B82F6".to_string()],
            },
        ],
        skills: vec![
            SkillCategory {
                title: "Languages".to_string(),
                icon: "Code".to_string(),
                skills: vec![
                    "JavaScript".to_string(),
                    "Python".to_string(),
                    "Java".to_string(),
                    "C/C++".to_string(),
                    "HTML/CSS".to_string(),
                ],
                color: vec!["#06B6D4".to_string(), "#3B82F6".to_string()],
            },
            SkillCategory {
                title: "Frontend".to_string(),
                icon: "Layout".to_string(),
                skills: vec![
                    "React".to_string(),
                    "Responsive Design".to_string(),
                    "UI/UX".to_string(),
                    "Tailwind CSS".to_string(),
                ],
                color: vec!["#3B82F6".to_string(), "#06B6D4".to_string()],
            },
            SkillCategory {
                title: "Backend".to_string(),
                icon: "Database".to_string(),
                skills: vec![
                    "Node.js".to_string(),
                    "REST APIs".to_string(),
                    "MySQL".to_string(),
                    "MongoDB".to_string(),
                    "PostgreSQL".to_string(),
                ],
                color: vec!["#14B8A6".to_string(), "#06B6D4".to_string()],
            },
            SkillCategory {
                title: "Hardware/IoT".to_string(),
                icon: "Cpu".to_string(),
                skills: vec![
                    "Arduino".to_string(),
                    "Raspberry Pi".to_string(),
                    "MicroPython".to_string(),
                    "IoT Systems".to_string(),
                ],
                color: vec!["#06B6D4".to_string(), "#14B8A6".to_string()],
            },
            SkillCategory {
                title: "Version Control".to_string(),
                icon: "GitBranch".to_string(),
                skills: vec![
                    "Git".to_string(),
                    "GitHub".to_string(),
                    "Collaboration".to_string(),
                ],
                color: vec!["#3B82F6".to_string(), "#06B6D4".to_string()],
            },
            SkillCategory {
                title: "Blockchain".to_string(),
                icon: "Globe".to_string(),
                skills: vec![
                    "Solidity".to_string(),
                    "Smart Contracts".to_string(),
                    "Web3".to_string(),
                ],
                color: vec!["#06B6D4".to_string(), "#3B82F6".to_string()],
            },
        ],
        achievements: vec![
            Achievement {
                title: "Top 5 Finalist".to_string(),
                event: "GDG HackBuild".to_string(),
                description: "UNICRED project recognized among top finalists at VIT Mumbai \
                              hackathon"
                    .to_string(),
                icon: "Trophy".to_string(),
                color: vec!["#FBBF24".to_string(), "#F59E0B".to_string()],
            },
            Achievement {
                title: "Winner".to_string(),
                event: "Eureka Startup Pitch".to_string(),
                description: "Cura Horizon won first place in competitive startup pitch \
                              competition"
                    .to_string(),
                icon: "Award".to_string(),
                color: vec!["#06B6D4".to_string(), "#3B82F6".to_string()],
            },
            Achievement {
                title: "Winner".to_string(),
                event: "IEMHEALS 2024".to_string(),
                description: "Selected among 289 international teams for healthcare innovation"
                    .to_string(),
                icon: "Star".to_string(),
                color: vec!["#3B82F6".to_string(), "#06B6D4".to_string()],
            },
        ],
        publications: vec![
            Publication {
                title: "NeuroLens: Capturing and Replaying Memories".to_string(),
                kind: "Research Paper".to_string(),
                icon: "FileText".to_string(),
                description: "Exploring innovative approaches to memory capture and replay \
                              technology."
                    .to_string(),
                url: "https://drive.google.com/file/d/1tNe8I2_Yp-L3CDPHQZU7esxdtA5HgbuM/view?usp=drive_link"
                    .to_string(),
            },
            Publication {
                title: "Empowering Creativity: The Positive Role of AI in Modern Authorship"
                    .to_string(),
                kind: "Research Article".to_string(),
                icon: "FileText".to_string(),
                description: "Analyzing AI's impact on creative writing and authorship in modern \
                              workflows."
                    .to_string(),
                url: "https://drive.google.com/file/d/1D8VFn4BecHFWOup0v6s8OD4WJqb1iANs/view?usp=drive_link"
                    .to_string(),
            },
            Publication {
                title: "Striving to be the best version of yourself: one block at a time"
                    .to_string(),
                kind: "Published Book (Kindle)".to_string(),
                icon: "BookOpen".to_string(),
                description: "Personal development guide available as a Kindle book on Amazon."
                    .to_string(),
                url: "https://www.amazon.in/dp/B0DL3M2CPW".to_string(),
            },
        ],
        personal_info: PersonalInfo {
            languages: vec![
                "Bengali (Native)".to_string(),
                "English (Fluent)".to_string(),
                "Hindi (Good)".to_string(),
            ],
            interests: vec![
                "Full-Stack Development".to_string(),
                "UI/UX".to_string(),
                "Open-source Contributions".to_string(),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_is_complete() {
        let profile = builtin_portfolio();

        assert_eq!(profile.name, "Alokparna Mitra");
        assert_eq!(profile.education.len(), 3);
        assert_eq!(profile.experience.len(), 3);
        assert_eq!(profile.projects.len(), 4);
        assert_eq!(profile.skills.len(), 6);
        assert_eq!(profile.achievements.len(), 3);
        assert_eq!(profile.publications.len(), 3);
        assert!(!profile.personal_info.languages.is_empty());
    }

    #[test]
    fn builtin_profile_advertises_the_contact_endpoint() {
        assert_eq!(
            builtin_portfolio().contact_endpoint_url(),
            "https://portfolio-alokparna.pages.dev/contact"
        );
    }

    #[test]
    fn first_experience_carries_named_links() {
        let profile = builtin_portfolio();
        let cura = &profile.experience[0];

        assert_eq!(cura.company, "Cura Horizon");
        assert!(cura.links.contains_key("demo"));
        assert!(cura.links.contains_key("report"));
    }
}
