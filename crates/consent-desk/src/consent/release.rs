use serde::Serialize;

/// Model release wording shown above the consent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseForm {
    pub title: &'static str,
    pub activity: &'static str,
    pub paragraphs: &'static [&'static str],
    pub acknowledgement: &'static str,
}

impl ReleaseForm {
    pub fn standard() -> Self {
        Self {
            title: "Safaricom Hook – Model Release Form",
            activity: "Activity: Interviews to be used for Online Media",
            paragraphs: STANDARD_PARAGRAPHS,
            acknowledgement: "I confirm that I have read and understood the above Model Release Form and I voluntarily give my full consent.",
        }
    }
}

const STANDARD_PARAGRAPHS: &[&str] = &[
    "I agree to be interviewed and to have my story recorded by videography and to have my photographs taken using camera devices (the “said material”) by Safaricom PLC (hereinafter “Safaricom”) or Safaricom’s agents, contractors for purposes of communicating, marketing and advertising any and all matters relating to Safaricom PLC, select shareholders, affiliates and partners.",
    "I agree and acknowledge that the said material has been obtained by Safaricom in pursuance of the above stated action and that the said material will be utilized by Safaricom in perpetuity.",
    "I permit Safaricom and Safaricom’s licensees, select shareholders, affiliates, partners, assignees or clients to use, (for a period of at least two years) the said material and/or drawings, from them and any other reproductions or adaptations of the said materials, either complete or in part for any kind of communication and advertising.",
    "I further permit Safaricom’s licensees, select shareholders, affiliates, partners, assignees or clients to use the said materials in any media electronic or otherwise or before any forum or gatherings including and any other material for purpose of education, communication, promotion and advertising by Safaricom PLC.",
    "I understand and accept that I shall receive no fee or future payment for my appearance and participation for the use of the said material in the advertising and public relations of Safaricom PLC or for the use of the said material in any Safaricom related venture whether now or in future.",
    "I understand and accept that I shall neither sue nor bring any proceeding against any such parties for, any liability, loss, demands, claims or causes of action, whether now known or unknown, for copyright or any similar matter, or based upon or relating to the use and exploitation of the said material.",
    "I further understand and accept that all rights to the said material are assigned to Safaricom PLC to use as it so wishes.",
];
