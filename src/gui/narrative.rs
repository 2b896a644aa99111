//! Static narrative text for the Introduction and Conclusion pages.

pub const INTRODUCTION_TITLE: &str = "Sleep Health and Lifestyle";

pub const INTRODUCTION: &[&str] = &[
    "Sleep is a fundamental component of human health, affecting physical well-being, \
     cognitive performance, and emotional stability. In recent years, the study of sleep \
     health has gained significant attention as researchers and healthcare professionals aim \
     to understand how sleep patterns influence overall lifestyle and well-being. The Sleep \
     Health and Lifestyle Dataset is designed to explore the intricate relationship between \
     individuals' sleep habits and their broader lifestyle choices, providing valuable insights \
     for improving sleep quality and promoting healthier living. The dataset is structured to \
     enable the analysis of correlations between sleep habits and lifestyle behaviors, allowing \
     researchers to explore patterns, identify risk factors for poor sleep, and assess the \
     impact of lifestyle interventions on sleep health.",
    "This dataset can be utilized by sleep scientists, healthcare professionals, public health \
     policymakers, and data analysts to develop recommendations, tools, and interventions aimed \
     at enhancing both sleep and overall well-being.",
];

pub const CONCLUSION_TITLE: &str = "Conclusion";

pub const CONCLUSION: &[&str] = &[
    "The Sleep Health and Lifestyle Dataset offers a comprehensive resource for examining the \
     complex interplay between sleep habits and lifestyle choices. By integrating diverse \
     factors such as sleep duration, quality, health metrics, and daily behaviors, this dataset \
     enables a deeper understanding of how lifestyle affects sleep health and how sleep impacts \
     overall well-being.",
    "Insights gleaned from this dataset can inform targeted interventions aimed at improving \
     sleep hygiene and lifestyle choices. Researchers and health professionals can utilize the \
     data to develop personalized sleep recommendations, identify risk factors for sleep \
     disorders, and design holistic strategies to enhance both physical and mental health.",
    "Ultimately, this dataset provides a valuable foundation for improving public awareness \
     about the importance of sleep and fostering healthier lifestyles, contributing to better \
     long-term health outcomes and quality of life.",
];
