//! Pre-authored reply text. Nothing here is interpolated with user input.

pub const GREETING_TEMPLATE: &str = "Hello! I'm your Argo Ocean Data AI assistant. I can help you explore ocean data, answer questions about marine science, and generate images related to oceanography. What would you like to know about our oceans?";

pub const PACIFIC_TEMPLATE: &str = "The Pacific Ocean is the largest and deepest of Earth's oceans, covering roughly 165 million square kilometres and reaching nearly 11,000 metres in the Mariana Trench.

Key characteristics from Argo float observations:
- Surface temperatures range from below 0°C near the poles to above 30°C in the Western Pacific Warm Pool.
- The El Niño-Southern Oscillation (ENSO) drives large year-to-year swings in equatorial heat content.
- The North Pacific is relatively fresh, with surface salinity around 32-34 PSU.

Argo floats have profiled the Pacific continuously since the early 2000s, giving us a detailed picture of how heat moves between the surface and the deep ocean. Would you like to look at temperature, salinity, or circulation in a specific region?";

pub const ATLANTIC_TEMPLATE: &str = "The Atlantic Ocean is the second-largest ocean basin and plays an outsized role in global climate through the Atlantic Meridional Overturning Circulation (AMOC).

Key characteristics from Argo float observations:
- The Gulf Stream carries warm tropical water northward along the North American coast and across to Europe.
- The subtropical North Atlantic is the saltiest open-ocean region, with surface salinity above 37 PSU.
- Deep water forms in the Labrador and Nordic Seas, sinking and spreading southward at depth.

Argo profiles help track the strength of the overturning circulation and the warming of intermediate waters. Which part of the Atlantic would you like to explore?";

pub const TEMPERATURE_TEMPLATE: &str = "Ocean temperature is one of the core parameters measured by the Argo float network.

What the data shows:
- Sea surface temperatures range from about -2°C in polar waters to over 30°C in the tropics.
- Below the mixed layer, temperature drops sharply through the thermocline, typically between 200 and 1,000 metres.
- The deep ocean below 2,000 metres stays cold, usually between 0°C and 4°C.

Argo floats record a temperature profile from 2,000 metres to the surface roughly every 10 days, and these profiles show that the upper ocean has absorbed more than 90% of the excess heat in the climate system. Would you like to explore temperature trends for a particular basin or depth?";

pub const SALINITY_TEMPLATE: &str = "Salinity measures the concentration of dissolved salts in seawater, usually reported in Practical Salinity Units (PSU).

What the data shows:
- The global average is about 35 PSU.
- Evaporation-dominated subtropical gyres are saltier, while regions with heavy rainfall or river outflow are fresher.
- Together with temperature, salinity sets seawater density, which drives the deep thermohaline circulation.

Argo floats carry conductivity sensors that measure salinity alongside every temperature profile, revealing long-term changes in the global water cycle. Would you like to compare salinity between regions or over time?";

pub const CURRENTS_TEMPLATE: &str = "Ocean currents move heat, salt, nutrients and carbon around the globe.

Main components of the circulation:
- Wind-driven surface currents such as the Gulf Stream, the Kuroshio and the Antarctic Circumpolar Current.
- The thermohaline circulation, a slow global conveyor driven by differences in temperature and salinity.
- Western boundary currents, which are faster and narrower than their eastern counterparts.

Argo floats drift at a parking depth of about 1,000 metres between profiles, so their trajectories also provide direct measurements of mid-depth currents. Would you like to look at surface circulation or the deep ocean?";

pub const ARGO_TEMPLATE: &str = "The Argo program is an international array of nearly 4,000 autonomous profiling floats that measure the upper 2,000 metres of the global ocean.

How a float works:
- It drifts at a parking depth of about 1,000 metres for roughly 10 days.
- It then sinks to 2,000 metres and rises to the surface, measuring temperature, salinity and pressure on the way up.
- At the surface it transmits its profile by satellite before descending again.

Since 2000 Argo has collected more than two million profiles, all freely available in near real time. Biogeochemical Argo floats add sensors for oxygen, nitrate, pH, chlorophyll and particles. What would you like to know about the Argo data?";

pub const DEFAULT_TEMPLATE: &str = "I can help you explore ocean data collected by the Argo float network and other observing systems.

Here are some topics you can ask about:
- Ocean temperature profiles and warming trends
- Salinity patterns and the global water cycle
- Ocean currents and circulation
- The Pacific and Atlantic ocean basins
- How Argo floats collect and transmit their data

You can also open the image panel to create an ocean visualization. What would you like to explore?";

pub const IMAGE_CAPTION_TEMPLATE: &str = "Here's the generated ocean visualization:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_templates_are_multi_line() {
        for template in [
            PACIFIC_TEMPLATE,
            ATLANTIC_TEMPLATE,
            TEMPERATURE_TEMPLATE,
            SALINITY_TEMPLATE,
            CURRENTS_TEMPLATE,
            ARGO_TEMPLATE,
            DEFAULT_TEMPLATE,
        ] {
            assert!(template.lines().count() > 3);
        }
    }
}
