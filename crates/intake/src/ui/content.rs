//! Fixed landing copy. Nothing here depends on form state.

pub(crate) const BRAND: &str = "CardioAI";

pub(crate) const HERO_BADGE: &str = "Powered by Random Forest v1.0";
pub(crate) const HERO_TITLE: &str = "Predict Heart Health";
pub(crate) const HERO_TITLE_ACCENT: &str = "In Seconds.";
pub(crate) const HERO_BODY: &str = "Our advanced ML model analyzes your biometrics (Age, BMI, \
Blood Pressure, and Lifestyle) to estimate cardiovascular risk with 73% accuracy.";
pub(crate) const HERO_BADGES: [&str; 2] = ["Secure Data", "Medically Tuned"];

pub(crate) const FORM_TITLE: &str = "Health Analysis";
pub(crate) const FORM_SUBTITLE: &str = "Enter your vitals below.";
pub(crate) const ANALYZE_LABEL: &str = "Analyze My Risk";
pub(crate) const PROCESSING_LABEL: &str = "Processing...";

pub(crate) struct Stat {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
}

pub(crate) const STATS: [Stat; 4] = [
    Stat {
        value: "70k+",
        label: "Patient Records",
    },
    Stat {
        value: "73%",
        label: "Model Accuracy",
    },
    Stat {
        value: "<1s",
        label: "Analysis Time",
    },
    Stat {
        value: "24/7",
        label: "Availability",
    },
];

pub(crate) struct Step {
    pub(crate) title: &'static str,
    pub(crate) body: &'static str,
}

pub(crate) const PROCESS_INTRO: &str =
    "From your data to a detailed health insight in three steps.";

pub(crate) const PROCESS_STEPS: [Step; 3] = [
    Step {
        title: "1. Data Entry",
        body: "You input simple biometrics. We don't ask for names or sensitive personal \
identifiers, ensuring your privacy.",
    },
    Step {
        title: "2. AI Processing",
        body: "Our Random Forest model cross-references your vitals against 70,000 historical \
patient outcomes to find patterns.",
    },
    Step {
        title: "3. Risk Assessment",
        body: "You receive an instant probability score, allowing you to decide if you need to \
schedule a doctor's visit.",
    },
];

pub(crate) const PRESSURE_TITLE: &str = "Understanding BMI & Blood Pressure";

pub(crate) const PRESSURE_NOTES: [Step; 2] = [
    Step {
        title: "Systolic (Top Number)",
        body: "Measures the pressure in your arteries when your heart beats. High values can \
indicate stress.",
    },
    Step {
        title: "Diastolic (Bottom Number)",
        body: "Measures the pressure in your arteries between beats. This should be lower than \
the top number.",
    },
];

pub(crate) const CHART_TITLE: &str = "Sample Patient Data Distribution";
pub(crate) const CHART_BARS: [u64; 8] = [40, 65, 45, 80, 55, 90, 70, 95];

pub(crate) struct FaqEntry {
    pub(crate) question: &'static str,
    pub(crate) answer: &'static str,
}

pub(crate) const FAQ_COUNT: usize = 4;

pub(crate) const FAQ: [FaqEntry; FAQ_COUNT] = [
    FaqEntry {
        question: "Is this a medical diagnosis?",
        answer: "No. This tool is for informational purposes only. It uses statistical \
probability based on historical data to estimate risk. Always consult a certified medical \
professional for diagnosis.",
    },
    FaqEntry {
        question: "How accurate is the 73% figure?",
        answer: "This accuracy was achieved using K-Fold Cross Validation on the Cardiovascular \
Disease dataset. While 73% is standard for this specific public dataset, real-world individual \
results may vary.",
    },
    FaqEntry {
        question: "Is my data saved?",
        answer: "No. All processing happens in this session (or transiently on our server for \
the demo). We do not store your personal health data.",
    },
    FaqEntry {
        question: "What do I do if the result is 'High Risk'?",
        answer: "Don't panic. High risk in our model simply means your vitals match patterns of \
patients who had heart issues. We recommend scheduling a routine check-up with your doctor to \
be sure.",
    },
];

pub(crate) const FOOTER_ABOUT: &str = "Empowering patients with early detection tools powered \
by Random Forest Machine Learning algorithms.";
pub(crate) const FOOTER_DISCLAIMER: &str = "Not a replacement for professional medical advice.";
